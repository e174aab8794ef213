//! APIエラーハンドリング
//!
//! ハンドラー境界でのエラーを、HTTPステータスとメッセージを持つ
//! 統一されたエラー型に変換する。
//! レスポンスボディはJSON形式で`error`と`message`フィールドを含む。

use lambda_http::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// エラー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoErrorKind {
    /// パスパラメータのIDが欠落
    InvalidId,
    /// リクエストボディがJSONとして不正
    InvalidBody,
    /// 指定IDのTodoが存在しない
    NotFound,
    /// ストア操作の失敗
    InternalError,
    /// リソースが対応していないHTTPメソッド
    MethodNotAllowed,
}

impl TodoErrorKind {
    /// エラー種別の文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoErrorKind::InvalidId => "invalid_id",
            TodoErrorKind::InvalidBody => "invalid_body",
            TodoErrorKind::NotFound => "not_found",
            TodoErrorKind::InternalError => "internal_error",
            TodoErrorKind::MethodNotAllowed => "method_not_allowed",
        }
    }

    /// エラー種別の標準ステータスコード
    pub fn default_status(&self) -> StatusCode {
        match self {
            TodoErrorKind::InvalidId | TodoErrorKind::InvalidBody => StatusCode::BAD_REQUEST,
            TodoErrorKind::NotFound => StatusCode::NOT_FOUND,
            TodoErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            TodoErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl std::fmt::Display for TodoErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// APIエラーレスポンスのボディ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    /// エラー種別（例: "invalid_id", "not_found", "internal_error"）
    pub error: TodoErrorKind,
    /// 詳細なエラーメッセージ
    pub message: String,
}

/// ハンドラーが返すAPIエラー
///
/// 通常は種別ごとの標準ステータスを使うが、互換性のため
/// `with_status`で別のステータスを持たせることができる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TodoApiError {
    kind: TodoErrorKind,
    status: StatusCode,
    message: String,
}

impl TodoApiError {
    /// 新しいTodoApiErrorを作成（種別の標準ステータスを使用）
    pub fn new(kind: TodoErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: kind.default_status(),
            message: message.into(),
        }
    }

    /// 400 Bad Request（IDが欠落）
    pub fn invalid_id() -> Self {
        Self::new(TodoErrorKind::InvalidId, "Invalid Id")
    }

    /// 400 Bad Request（ボディが不正）
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::new(TodoErrorKind::InvalidBody, message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(TodoErrorKind::NotFound, message)
    }

    /// 500 Internal Server Error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(TodoErrorKind::InternalError, message)
    }

    /// 405 Method Not Allowed
    pub fn method_not_allowed(method: &str) -> Self {
        Self::new(
            TodoErrorKind::MethodNotAllowed,
            format!("Method not allowed: {}", method),
        )
    }

    /// 種別はそのままに、返却するステータスコードだけを差し替える
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// エラー種別を取得
    pub fn kind(&self) -> TodoErrorKind {
        self.kind
    }

    /// ステータスコードを取得
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// エラーメッセージを取得
    pub fn message(&self) -> &str {
        &self.message
    }

    /// レスポンスボディを構築
    pub fn body(&self) -> ApiErrorBody {
        ApiErrorBody {
            error: self.kind,
            message: self.message.clone(),
        }
    }
}
