/// Todoリクエストエンベロープ
///
/// API Gatewayプロキシ統合のHTTPリクエストから、ハンドラーが必要とする
/// パスパラメータ・クエリパラメータ・ボディ・リクエストIDを抽出する。
use std::collections::HashMap;

use lambda_http::request::RequestContext;
use lambda_http::{Request, RequestExt};

use crate::application::TodoApiError;
use crate::domain::{TodoInput, TODO_ID_PARAM};

/// ハンドラーに渡すリクエスト
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoRequest {
    /// パスパラメータ（`/todos/{id}`の`id`など）
    pub path_params: HashMap<String, String>,
    /// クエリ文字列パラメータ
    pub query_params: HashMap<String, String>,
    /// デシリアライズ済みのリクエストボディ（空ボディはデフォルト値）
    pub body: TodoInput,
    /// リクエストのトレースID（API GatewayのrequestId）
    pub request_id: String,
}

impl TodoRequest {
    /// リクエストIDのみを持つ空のリクエストを作成
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            ..Self::default()
        }
    }

    /// パスパラメータを追加
    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    /// `id`パスパラメータを設定
    pub fn with_todo_id(self, id: impl Into<String>) -> Self {
        self.with_path_param(TODO_ID_PARAM, id)
    }

    /// ボディを設定
    pub fn with_body(mut self, body: TodoInput) -> Self {
        self.body = body;
        self
    }

    /// パスパラメータからTodo IDを取得（欠落・空文字はNone）
    pub fn todo_id(&self) -> Option<&str> {
        self.path_params
            .get(TODO_ID_PARAM)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Lambda HTTPリクエストからエンベロープを構築
    ///
    /// # エラー
    /// ボディがTodoのJSONとして解釈できない場合は`InvalidBody`
    pub fn from_http(request: &Request) -> Result<Self, TodoApiError> {
        let path_params = request
            .path_parameters_ref()
            .map(|params| {
                params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default();

        let query_params = request
            .query_string_parameters_ref()
            .map(|params| {
                params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default();

        let body = parse_body(request.body().as_ref())?;

        Ok(Self {
            path_params,
            query_params,
            body,
            request_id: extract_request_id(request).unwrap_or_default(),
        })
    }
}

/// ボディをTodoInputとしてデシリアライズ（空白のみ・`null`のボディはデフォルト値）
fn parse_body(bytes: &[u8]) -> Result<TodoInput, TodoApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(TodoInput::default());
    }

    serde_json::from_slice::<Option<TodoInput>>(bytes)
        .map(Option::unwrap_or_default)
        .map_err(|e| TodoApiError::invalid_body(format!("Invalid request body: {}", e)))
}

/// トレースIDを抽出
///
/// API GatewayのリクエストコンテキストのrequestIdを優先し、
/// 取得できない場合はLambda呼び出しのリクエストIDを使用する。
fn extract_request_id(request: &Request) -> Option<String> {
    let from_gateway = match request.request_context_ref() {
        Some(RequestContext::ApiGatewayV1(ctx)) => ctx.request_id.clone(),
        Some(RequestContext::ApiGatewayV2(ctx)) => ctx.request_id.clone(),
        _ => None,
    };

    from_gateway.filter(|id| !id.is_empty()).or_else(|| {
        request
            .lambda_context_ref()
            .map(|ctx| ctx.request_id.clone())
            .filter(|id| !id.is_empty())
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::application::TodoErrorKind;
    use lambda_http::aws_lambda_events::apigw::ApiGatewayProxyRequestContext;
    use lambda_http::http::Request as HttpRequest;
    use lambda_http::Body;

    /// API Gateway (REST) 経由のリクエストを模したテスト用リクエストを作成
    pub fn gateway_request(
        method: &str,
        uri: &str,
        request_id: &str,
        path_params: &[(&str, &str)],
        body: Body,
    ) -> Request {
        let mut context = ApiGatewayProxyRequestContext::default();
        context.request_id = Some(request_id.to_string());

        let params: HashMap<String, String> = path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        HttpRequest::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .unwrap()
            .with_path_parameters(params)
            .with_request_context(RequestContext::ApiGatewayV1(context))
    }

    #[test]
    fn test_todo_id_present() {
        let request = TodoRequest::new("req-1").with_todo_id("todo-1");
        assert_eq!(request.todo_id(), Some("todo-1"));
    }

    #[test]
    fn test_todo_id_missing_or_empty() {
        assert_eq!(TodoRequest::new("req-1").todo_id(), None);
        assert_eq!(TodoRequest::new("req-1").with_todo_id("").todo_id(), None);
    }

    #[test]
    fn test_from_http_extracts_envelope() {
        let request = gateway_request(
            "PATCH",
            "https://api.example.com/v1/todos/todo-1",
            "gw-req-123",
            &[("id", "todo-1")],
            Body::Text(r#"{"title":"walk the dog","order":2}"#.to_string()),
        )
        .with_query_string_parameters(HashMap::from([(
            "verbose".to_string(),
            "1".to_string(),
        )]));

        let envelope = TodoRequest::from_http(&request).unwrap();

        assert_eq!(envelope.request_id, "gw-req-123");
        assert_eq!(envelope.todo_id(), Some("todo-1"));
        assert_eq!(envelope.query_params.get("verbose").map(String::as_str), Some("1"));
        assert_eq!(envelope.body.title, "walk the dog");
        assert_eq!(envelope.body.order, 2);
        assert!(!envelope.body.completed);
    }

    #[test]
    fn test_from_http_empty_body_is_default() {
        let request = gateway_request("GET", "/todos", "gw-req-1", &[], Body::Empty);

        let envelope = TodoRequest::from_http(&request).unwrap();

        assert_eq!(envelope.body, TodoInput::default());
        assert!(envelope.path_params.is_empty());
    }

    #[test]
    fn test_from_http_invalid_json_is_invalid_body() {
        let request = gateway_request(
            "POST",
            "/todos",
            "gw-req-1",
            &[],
            Body::Text("{not json".to_string()),
        );

        let err = TodoRequest::from_http(&request).unwrap_err();

        assert_eq!(err.kind(), TodoErrorKind::InvalidBody);
    }

    #[test]
    fn test_from_http_null_body_is_default() {
        let request = gateway_request(
            "POST",
            "/todos",
            "gw-req-1",
            &[],
            Body::Text(" null ".to_string()),
        );

        let envelope = TodoRequest::from_http(&request).unwrap();

        assert_eq!(envelope.body, TodoInput::default());
    }

    #[test]
    fn test_from_http_without_context_has_empty_request_id() {
        let request = HttpRequest::builder()
            .method("GET")
            .uri("/todos")
            .body(Body::Empty)
            .unwrap();

        let envelope = TodoRequest::from_http(&request).unwrap();

        assert!(envelope.request_id.is_empty());
    }
}
