// TodoBackend REST APIのルート定義
//
// API Gatewayに登録するリソースパスと、
// Todoごとの外部公開URLを組み立てるヘルパーを提供する。

/// アイテムリソースのパスパラメータ名
pub const TODO_ID_PARAM: &str = "id";

/// コレクションリソースのルートパス
pub const TODO_ROOT_PATH: &str = "/todos";

/// アイテムリソースのパス（API Gatewayのパステンプレート形式）
pub const TODO_ITEM_PATH: &str = "/todos/{id}";

/// API Gatewayステージ名（URLのバージョンセグメント）
pub const API_VERSION: &str = "v1";

/// Todoの外部公開URLを組み立てる
///
/// `{base_url}/{API_VERSION}{TODO_ROOT_PATH}/{id}` の形式。
/// base_url末尾の`/`は取り除く。
pub fn todo_url(base_url: &str, id: &str) -> String {
    format!(
        "{}/{}{}/{}",
        base_url.trim_end_matches('/'),
        API_VERSION,
        TODO_ROOT_PATH,
        id
    )
}
