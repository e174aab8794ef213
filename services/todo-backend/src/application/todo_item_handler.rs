/// Todoアイテムハンドラー
///
/// `/todos/{id}`リソースの取得・部分更新・削除を処理する。
///
/// 部分更新は「読み取り → マージ → 書き戻し」の2回のストア操作で行い、
/// 間に排他制御はない。同じキーへの並行書き込みは後勝ちとなる。
use std::sync::Arc;

use lambda_http::http::StatusCode;
use tracing::{debug, error, info, warn};

use crate::application::{ApiResponse, TodoApiError, TodoRequest};
use crate::domain::Todo;
use crate::infrastructure::{AccessorError, ObjectAccessor, ObjectStore};

/// `/todos/{id}`リソースのハンドラー
pub struct TodoItemHandler<S>
where
    S: ObjectStore,
{
    /// 共有オブジェクトアクセサー
    accessor: Arc<ObjectAccessor<S>>,
}

impl<S> TodoItemHandler<S>
where
    S: ObjectStore,
{
    /// 新しいTodoItemHandlerを作成
    pub fn new(accessor: Arc<ObjectAccessor<S>>) -> Self {
        Self { accessor }
    }

    /// Todoを取得（GET /todos/{id}）
    pub async fn get(&self, request: &TodoRequest) -> Result<ApiResponse<Todo>, TodoApiError> {
        let id = Self::todo_id(request)?;

        let todo = self
            .accessor
            .get::<Todo>(id)
            .await
            .map_err(|e| Self::read_error(id, e))?;

        Ok(ApiResponse::ok(todo))
    }

    /// Todoを部分更新（PATCH /todos/{id}）
    ///
    /// # 処理フロー
    /// 1. パスのIDを検証（欠落時はストアに触れずに`InvalidId`）
    /// 2. 既存のTodoを取得（存在しなければ書き込みなしで`NotFound`）
    /// 3. `Todo::merge_patch`のポリシーでマージ
    /// 4. 同じキーに全体を書き戻し
    ///
    /// 書き戻しの失敗は`InternalError`だが、ステータスは404で返す。
    pub async fn patch(&self, request: &TodoRequest) -> Result<ApiResponse<Todo>, TodoApiError> {
        let id = Self::todo_id(request)?;

        debug!(todo_id = id, body = ?request.body, "TodoItemHandler.patch リクエストボディ");

        let existing = self
            .accessor
            .get::<Todo>(id)
            .await
            .map_err(|e| Self::read_error(id, e))?;

        let merged = existing.merge_patch(id, request.body.clone());

        self.accessor.save(id, &merged).await.map_err(|e| {
            error!(todo_id = id, error = %e, "マージ結果の保存に失敗");
            TodoApiError::internal_error(e.to_string()).with_status(StatusCode::NOT_FOUND)
        })?;

        debug!(todo_id = id, todo = ?merged, "TodoItemHandler.patch レスポンスボディ");
        info!(todo_id = id, "Todoを更新");

        Ok(ApiResponse::ok(merged))
    }

    /// Todoを削除（DELETE /todos/{id}）
    ///
    /// 存在しないIDの削除も成功として204を返す。
    pub async fn delete(&self, request: &TodoRequest) -> Result<ApiResponse<()>, TodoApiError> {
        let id = Self::todo_id(request)?;

        self.accessor.delete(id).await.map_err(|e| {
            error!(todo_id = id, error = %e, "Todoの削除に失敗");
            TodoApiError::internal_error(e.to_string())
        })?;

        info!(todo_id = id, "Todoを削除");
        Ok(ApiResponse::no_content())
    }

    /// パスパラメータのIDを取得（欠落・空文字は`InvalidId`）
    fn todo_id(request: &TodoRequest) -> Result<&str, TodoApiError> {
        request.todo_id().ok_or_else(|| {
            warn!(request_id = %request.request_id, "パスパラメータにIDがない");
            TodoApiError::invalid_id()
        })
    }

    /// 読み取りエラーを変換
    ///
    /// アイテムリソースの失敗ステータスは404のみのため、
    /// 存在しない場合以外の読み取り失敗も404で返す。
    fn read_error(id: &str, err: AccessorError) -> TodoApiError {
        match err {
            AccessorError::NotFound(_) => {
                info!(todo_id = id, "Todoが見つからない");
                TodoApiError::not_found(format!("Todo not found: {}", id))
            }
            other => {
                error!(todo_id = id, error = %other, "Todoの読み取りに失敗");
                TodoApiError::internal_error(other.to_string()).with_status(StatusCode::NOT_FOUND)
            }
        }
    }
}
