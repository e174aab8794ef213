/// `/todos/{id}` アイテムリソース用 HTTP Lambdaエントリポイント
///
/// API Gatewayプロキシ統合経由のリクエストを受け取り、
/// GET（取得）/ PATCH（部分更新）/ DELETE（削除）を処理する。
use std::sync::Arc;

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use todo_backend::application::{dispatch_item, CorsPolicy, TodoItemHandler};
use todo_backend::infrastructure::{
    cors_allow_origin_from_env, init_logging, ObjectAccessor, S3Config, S3ObjectStore,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // アイテムのURLは保存済みの値を返すため、REST_APIは読まない
    let s3_config = S3Config::from_env()
        .await
        .inspect_err(|err| error!(error = %err, "S3設定読み込み失敗"))?;

    info!(bucket = s3_config.bucket(), "Todoアイテム Lambda関数を初期化");

    let store = S3ObjectStore::new(s3_config.client().clone(), s3_config.bucket().to_string());
    let handler = TodoItemHandler::new(Arc::new(ObjectAccessor::new(store)));
    let cors = CorsPolicy::new(&cors_allow_origin_from_env());

    let handler = &handler;
    let cors = &cors;
    run(service_fn(move |request: Request| async move {
        Ok::<Response<Body>, Error>(dispatch_item(handler, cors, &request).await)
    }))
    .await
}
