// アプリケーション層モジュール
pub mod api_error;
pub mod api_response;
pub mod http_dispatch;
pub mod id_generator;
pub mod todo_collection_handler;
pub mod todo_item_handler;
pub mod todo_request;

// 再エクスポート
pub use api_error::{ApiErrorBody, TodoApiError, TodoErrorKind};
pub use api_response::{ApiResponse, CorsPolicy};
pub use http_dispatch::{dispatch_collection, dispatch_item};
pub use id_generator::{IdGenerator, RequestIdGenerator};
pub use todo_collection_handler::TodoCollectionHandler;
pub use todo_item_handler::TodoItemHandler;
pub use todo_request::TodoRequest;
