/// `/todos` コレクションリソース用 HTTP Lambdaエントリポイント
///
/// API Gatewayプロキシ統合経由のリクエストを受け取り、
/// GET（一覧）/ POST（作成）/ DELETE（全削除）を処理する。
use std::sync::Arc;

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use todo_backend::application::{
    dispatch_collection, CorsPolicy, RequestIdGenerator, TodoCollectionHandler,
};
use todo_backend::infrastructure::{
    init_logging, ObjectAccessor, S3Config, S3ObjectStore, ServiceConfig,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // 設定はコールドスタート時に一度だけ読み込み、以降は読み取り専用
    let service_config = ServiceConfig::from_env()
        .inspect_err(|err| error!(error = %err, "サービス設定読み込み失敗"))?;
    let s3_config = S3Config::from_env()
        .await
        .inspect_err(|err| error!(error = %err, "S3設定読み込み失敗"))?;

    info!(
        bucket = s3_config.bucket(),
        rest_api = service_config.rest_api_url(),
        "Todoコレクション Lambda関数を初期化"
    );

    let store = S3ObjectStore::new(s3_config.client().clone(), s3_config.bucket().to_string());
    let handler = TodoCollectionHandler::new(
        Arc::new(ObjectAccessor::new(store)),
        RequestIdGenerator,
        service_config.rest_api_url(),
    );
    let cors = CorsPolicy::new(service_config.cors_allow_origin());

    let handler = &handler;
    let cors = &cors;
    run(service_fn(move |request: Request| async move {
        Ok::<Response<Body>, Error>(dispatch_collection(handler, cors, &request).await)
    }))
    .await
}
