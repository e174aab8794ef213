// Lambda HTTPリクエストのディスパッチ
//
// API Gatewayから渡されたリクエストをHTTPメソッドで振り分け、
// コレクション/アイテムハンドラーを呼び出してレスポンスに変換する。

use lambda_http::http::Method;
use lambda_http::{Body, Request, Response};
use tracing::{info, info_span, warn, Instrument};

use crate::application::{
    CorsPolicy, IdGenerator, TodoApiError, TodoCollectionHandler, TodoItemHandler, TodoRequest,
};
use crate::infrastructure::ObjectStore;

/// `/todos`へのリクエストを処理（GET / POST / DELETE / OPTIONS）
pub async fn dispatch_collection<S, G>(
    handler: &TodoCollectionHandler<S, G>,
    cors: &CorsPolicy,
    request: &Request,
) -> Response<Body>
where
    S: ObjectStore,
    G: IdGenerator,
{
    let method = request.method();
    match *method {
        Method::OPTIONS => return cors.preflight(),
        Method::GET | Method::POST | Method::DELETE => {}
        _ => return method_not_allowed(method, cors),
    }

    let todo_request = match TodoRequest::from_http(request) {
        Ok(todo_request) => todo_request,
        Err(err) => return err.into_http(cors),
    };

    let span = info_span!(
        "todo_collection",
        method = %method,
        request_id = %todo_request.request_id
    );

    async {
        info!("Todoコレクションリクエスト受信");

        let result = match *method {
            Method::GET => handler.list(&todo_request).await.map(|r| r.into_http(cors)),
            Method::POST => handler.create(&todo_request).await.map(|r| r.into_http(cors)),
            _ => handler
                .delete_all(&todo_request)
                .await
                .map(|r| r.into_http(cors)),
        };

        finish(result, cors)
    }
    .instrument(span)
    .await
}

/// `/todos/{id}`へのリクエストを処理（GET / PATCH / DELETE / OPTIONS）
pub async fn dispatch_item<S>(
    handler: &TodoItemHandler<S>,
    cors: &CorsPolicy,
    request: &Request,
) -> Response<Body>
where
    S: ObjectStore,
{
    let method = request.method();
    match *method {
        Method::OPTIONS => return cors.preflight(),
        Method::GET | Method::PATCH | Method::DELETE => {}
        _ => return method_not_allowed(method, cors),
    }

    let todo_request = match TodoRequest::from_http(request) {
        Ok(todo_request) => todo_request,
        Err(err) => return err.into_http(cors),
    };

    let span = info_span!(
        "todo_item",
        method = %method,
        request_id = %todo_request.request_id,
        todo_id = todo_request.todo_id().unwrap_or("")
    );

    async {
        info!("Todoアイテムリクエスト受信");

        let result = match *method {
            Method::GET => handler.get(&todo_request).await.map(|r| r.into_http(cors)),
            Method::PATCH => handler.patch(&todo_request).await.map(|r| r.into_http(cors)),
            _ => handler.delete(&todo_request).await.map(|r| r.into_http(cors)),
        };

        finish(result, cors)
    }
    .instrument(span)
    .await
}

fn method_not_allowed(method: &Method, cors: &CorsPolicy) -> Response<Body> {
    warn!(method = %method, "未対応のHTTPメソッド");
    TodoApiError::method_not_allowed(method.as_str()).into_http(cors)
}

fn finish(result: Result<Response<Body>, TodoApiError>, cors: &CorsPolicy) -> Response<Body> {
    match result {
        Ok(response) => {
            info!(status = response.status().as_u16(), "レスポンス送信");
            response
        }
        Err(err) => {
            info!(
                status = err.status().as_u16(),
                error = %err,
                "エラーレスポンス送信"
            );
            err.into_http(cors)
        }
    }
}
