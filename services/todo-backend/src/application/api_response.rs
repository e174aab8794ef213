// APIレスポンスとCORS
//
// ハンドラーの戻り値（ステータス・ボディ・Locationヘッダー）と、
// それをLambda HTTPレスポンスに変換する処理を提供する。
// すべてのレスポンス（エラー・プリフライトを含む）にCORSヘッダーを付与する。

use lambda_http::http::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS, CONTENT_TYPE, LOCATION,
};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde::Serialize;
use tracing::{error, warn};

use crate::application::TodoApiError;
use crate::infrastructure::service_config::DEFAULT_CORS_ALLOW_ORIGIN;

/// Access-Control-Allow-Headersの値
pub const CORS_ALLOW_HEADERS: &str = "Content-Type,X-Amz-Date,Authorization,X-Api-Key,Location";

/// Access-Control-Allow-Methodsの値
pub const CORS_ALLOW_METHODS: &str = "*";

const JSON_CONTENT_TYPE: &str = "application/json";

/// ハンドラーの成功レスポンス
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    status: StatusCode,
    body: Option<T>,
    location: Option<String>,
}

impl<T> ApiResponse<T> {
    /// 任意のステータスとボディでレスポンスを作成
    pub fn new(status: StatusCode, body: T) -> Self {
        Self {
            status,
            body: Some(body),
            location: None,
        }
    }

    /// 200 OK
    pub fn ok(body: T) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// 201 Created（Locationヘッダー付き）
    pub fn created(body: T, location: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CREATED,
            body: Some(body),
            location: Some(location.into()),
        }
    }

    /// 204 No Content（ボディなし）
    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: None,
            location: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    pub fn into_body(self) -> Option<T> {
        self.body
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Lambda HTTPレスポンスに変換
    pub fn into_http(self, cors: &CorsPolicy) -> Response<Body> {
        let body = match &self.body {
            Some(value) => match serde_json::to_string(value) {
                Ok(json) => Body::Text(json),
                Err(e) => {
                    error!(error = %e, "レスポンスボディのシリアライズに失敗");
                    return TodoApiError::internal_error("Failed to serialize response")
                        .into_http(cors);
                }
            },
            None => Body::Empty,
        };

        let mut response = Response::new(body);
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        if self.body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }
        if let Some(location) = &self.location {
            match HeaderValue::from_str(location) {
                Ok(value) => {
                    headers.insert(LOCATION, value);
                }
                Err(_) => warn!(location = %location, "Locationヘッダーに設定できない値"),
            }
        }
        cors.apply(headers);

        response
    }
}

impl TodoApiError {
    /// エラーレスポンス（JSON）に変換
    pub fn into_http(self, cors: &CorsPolicy) -> Response<Body> {
        // ApiErrorBodyは文字列と単純なenumのみなので失敗しない
        let json = serde_json::to_string(&self.body()).unwrap_or_default();

        let mut response = Response::new(Body::Text(json));
        *response.status_mut() = self.status();

        let headers = response.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        cors.apply(headers);

        response
    }
}

/// CORSポリシー
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allow_origin: HeaderValue,
}

impl CorsPolicy {
    /// 許可オリジンを指定して作成
    ///
    /// ヘッダー値として不正なオリジンはデフォルトのオリジンに置き換える。
    pub fn new(allow_origin: &str) -> Self {
        let allow_origin = HeaderValue::from_str(allow_origin).unwrap_or_else(|_| {
            warn!(
                allow_origin = allow_origin,
                "不正なCORSオリジンのためデフォルトを使用"
            );
            HeaderValue::from_static(DEFAULT_CORS_ALLOW_ORIGIN)
        });

        Self { allow_origin }
    }

    /// 許可オリジンを取得
    pub fn allow_origin(&self) -> &HeaderValue {
        &self.allow_origin
    }

    /// CORSヘッダーをヘッダーマップに追加
    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_ALLOW_METHODS),
        );
        headers.insert(ACCESS_CONTROL_EXPOSE_HEADERS, HeaderValue::from_static("Location"));
    }

    /// OPTIONSプリフライトへの応答（200、ボディなし）
    pub fn preflight(&self) -> Response<Body> {
        let mut response = Response::new(Body::Empty);
        *response.status_mut() = StatusCode::OK;
        self.apply(response.headers_mut());
        response
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CORS_ALLOW_ORIGIN)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::Todo;

    /// レスポンスボディを文字列として取得
    pub fn body_text(response: &Response<Body>) -> String {
        match response.body() {
            Body::Text(text) => text.clone(),
            Body::Binary(bytes) => String::from_utf8(bytes.clone()).unwrap(),
            Body::Empty => String::new(),
            _ => panic!("予期しないBody型"),
        }
    }

    /// レスポンスボディをJSONとしてパース
    pub fn body_json(response: &Response<Body>) -> serde_json::Value {
        serde_json::from_str(&body_text(response)).unwrap()
    }

    fn header<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
        response.headers().get(name).map(|v| v.to_str().unwrap())
    }

    #[test]
    fn test_created_into_http_sets_location() {
        let todo = Todo {
            id: "todo-1".to_string(),
            title: "a".to_string(),
            url: "https://api.example.com/v1/todos/todo-1".to_string(),
            ..Todo::default()
        };
        let response = ApiResponse::created(todo, "https://api.example.com/v1/todos/todo-1")
            .into_http(&CorsPolicy::default());

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            header(&response, "location"),
            Some("https://api.example.com/v1/todos/todo-1")
        );
        assert_eq!(header(&response, "content-type"), Some("application/json"));
        assert_eq!(body_json(&response)["id"], "todo-1");
    }

    #[test]
    fn test_no_content_has_empty_body() {
        let response = ApiResponse::<()>::no_content().into_http(&CorsPolicy::default());

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(body_text(&response), "");
        assert!(response.headers().get("content-type").is_none());
    }

    #[test]
    fn test_error_into_http() {
        let response = TodoApiError::invalid_id().into_http(&CorsPolicy::default());

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(&response),
            serde_json::json!({"error": "invalid_id", "message": "Invalid Id"})
        );
        assert_eq!(
            header(&response, "access-control-allow-origin"),
            Some("https://www.todobackend.com")
        );
    }

    #[test]
    fn test_cors_headers_applied_to_success() {
        let cors = CorsPolicy::new("https://app.example.com");
        let response = ApiResponse::ok(Vec::<Todo>::new()).into_http(&cors);

        assert_eq!(
            header(&response, "access-control-allow-origin"),
            Some("https://app.example.com")
        );
        assert_eq!(
            header(&response, "access-control-allow-headers"),
            Some(CORS_ALLOW_HEADERS)
        );
        assert_eq!(header(&response, "access-control-allow-methods"), Some("*"));
        assert_eq!(header(&response, "access-control-expose-headers"), Some("Location"));
        assert_eq!(body_text(&response), "[]");
    }

    #[test]
    fn test_invalid_origin_falls_back_to_default() {
        let cors = CorsPolicy::new("bad\norigin");
        assert_eq!(cors.allow_origin(), "https://www.todobackend.com");
    }

    #[test]
    fn test_preflight() {
        let response = CorsPolicy::default().preflight();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(&response), "");
        assert!(response.headers().get("access-control-allow-origin").is_some());
    }
}
