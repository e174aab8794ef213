// Domain layer modules
pub mod routes;
pub mod todo;

// Re-exports
pub use routes::{todo_url, API_VERSION, TODO_ID_PARAM, TODO_ITEM_PATH, TODO_ROOT_PATH};
pub use todo::{Todo, TodoInput};
