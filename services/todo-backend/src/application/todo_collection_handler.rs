/// Todoコレクションハンドラー
///
/// `/todos`リソースの一覧取得・作成・全削除を処理する。
use std::sync::Arc;

use lambda_http::http::StatusCode;
use tracing::{debug, error, info};

use crate::application::{ApiResponse, IdGenerator, TodoApiError, TodoRequest};
use crate::domain::{todo_url, Todo};
use crate::infrastructure::{ObjectAccessor, ObjectStore};

/// `/todos`リソースのハンドラー
///
/// ストアへのアクセスはアイテムハンドラーと共有する`ObjectAccessor`を経由する。
pub struct TodoCollectionHandler<S, G>
where
    S: ObjectStore,
    G: IdGenerator,
{
    /// 共有オブジェクトアクセサー
    accessor: Arc<ObjectAccessor<S>>,
    /// 新規TodoのID生成器
    id_generator: G,
    /// 外部公開ベースURL（起動時に一度だけ設定）
    rest_api_url: String,
}

impl<S, G> TodoCollectionHandler<S, G>
where
    S: ObjectStore,
    G: IdGenerator,
{
    /// 新しいTodoCollectionHandlerを作成
    pub fn new(
        accessor: Arc<ObjectAccessor<S>>,
        id_generator: G,
        rest_api_url: impl Into<String>,
    ) -> Self {
        Self {
            accessor,
            id_generator,
            rest_api_url: rest_api_url.into(),
        }
    }

    /// 全Todoを取得（GET /todos）
    ///
    /// 空のバケットは空配列を返す。ストアの失敗は`InternalError`。
    pub async fn list(
        &self,
        _request: &TodoRequest,
    ) -> Result<ApiResponse<Vec<Todo>>, TodoApiError> {
        let todos: Vec<Todo> = self.accessor.get_all().await.map_err(|e| {
            error!(error = %e, "Todo一覧の取得に失敗");
            TodoApiError::internal_error(e.to_string())
        })?;

        info!(count = todos.len(), "Todo一覧を取得");
        Ok(ApiResponse::ok(todos))
    }

    /// Todoを作成（POST /todos）
    ///
    /// # 処理フロー
    /// 1. リクエストのトレースIDからTodo IDを生成
    /// 2. ベースURL・APIバージョン・ルートパス・IDからURLを組み立て
    /// 3. キー = IDとして保存
    /// 4. 201 Created と Locationヘッダー（= URL）を返却
    pub async fn create(&self, request: &TodoRequest) -> Result<ApiResponse<Todo>, TodoApiError> {
        let id = self.id_generator.generate_id(request);
        if id.is_empty() {
            error!("リクエストIDが取得できずTodo IDを割り当てられない");
            return Err(TodoApiError::internal_error("Missing request id"));
        }

        let url = todo_url(&self.rest_api_url, &id);
        let todo = Todo::create(id, url.clone(), request.body.clone());

        debug!(todo = ?todo, "TodoCollectionHandler.create 保存するボディ");

        self.accessor.save(&todo.id, &todo).await.map_err(|e| {
            error!(todo_id = %todo.id, error = %e, "Todoの保存に失敗");
            TodoApiError::internal_error(e.to_string())
        })?;

        info!(todo_id = %todo.id, url = %url, "Todoを作成");
        Ok(ApiResponse::created(todo, url))
    }

    /// 全Todoを削除（DELETE /todos）
    ///
    /// 削除対象がなくても成功する。204と空配列を返す。
    pub async fn delete_all(
        &self,
        _request: &TodoRequest,
    ) -> Result<ApiResponse<Vec<Todo>>, TodoApiError> {
        self.accessor.delete_all().await.map_err(|e| {
            error!(error = %e, "Todoの全削除に失敗");
            TodoApiError::internal_error(e.to_string())
        })?;

        info!("Todoを全削除");
        Ok(ApiResponse::new(StatusCode::NO_CONTENT, Vec::new()))
    }
}
