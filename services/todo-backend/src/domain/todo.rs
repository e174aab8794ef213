/// Todoエンティティとマージポリシー
///
/// TodoBackendで扱う唯一のドメインエンティティ。
/// 永続化・レスポンスの両方で同じJSON表現を使用する。
use serde::{Deserialize, Deserializer, Serialize};

/// 永続化されたTodo
///
/// - `id`: 作成時に割り当てられる不変の識別子（オブジェクトキーと同一）
/// - `url`: 作成時に計算されるアイテムエンドポイントの完全URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub url: String,
}

/// クライアントから受け取るTodoのリクエストボディ
///
/// `id`と`url`はサーバー側でのみ設定されるため、このフィールドには含まない。
/// 未知のフィールド（`id`, `url`を含む）は無視される。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoInput {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: i64,
}

/// `null`を未指定と同じゼロ値として読み込む
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Todo {
    /// 新規作成用のTodoを構築
    ///
    /// クライアント指定の`title`/`completed`/`order`に、
    /// サーバー側で決定した`id`と`url`を加える。
    pub fn create(id: impl Into<String>, url: impl Into<String>, input: TodoInput) -> Self {
        Self {
            id: id.into(),
            title: input.title,
            completed: input.completed,
            order: input.order,
            url: url.into(),
        }
    }

    /// 既存のTodoに部分更新をマージした結果を返す
    ///
    /// フィールドごとのポリシー:
    /// - `url`: 常に既存の値（クライアントは変更できない）
    /// - `order`: 0なら既存の値を維持、それ以外は上書き
    /// - `title`: 空文字なら既存の値を維持、それ以外は上書き
    /// - `completed`: リクエストの値をそのまま採用（省略時はfalseに戻る）
    /// - `id`: パスで指定された識別子
    pub fn merge_patch(&self, id: impl Into<String>, patch: TodoInput) -> Self {
        let order = if patch.order == 0 {
            self.order
        } else {
            patch.order
        };

        let title = if patch.title.is_empty() {
            self.title.clone()
        } else {
            patch.title
        };

        Self {
            id: id.into(),
            title,
            completed: patch.completed,
            order,
            url: self.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn existing() -> Todo {
        Todo {
            id: "todo-1".to_string(),
            title: "A".to_string(),
            completed: false,
            order: 5,
            url: "U".to_string(),
        }
    }

    #[test]
    fn test_create_takes_client_fields_and_server_id_url() {
        let input = TodoInput {
            title: "牛乳を買う".to_string(),
            completed: true,
            order: 3,
        };

        let todo = Todo::create("req-1", "https://api.example.com/v1/todos/req-1", input);

        assert_eq!(todo.id, "req-1");
        assert_eq!(todo.url, "https://api.example.com/v1/todos/req-1");
        assert_eq!(todo.title, "牛乳を買う");
        assert!(todo.completed);
        assert_eq!(todo.order, 3);
    }

    /// 空・ゼロのフィールドは既存値を消さない、completedは常にリクエストの値
    #[test]
    fn test_merge_patch_keeps_title_and_order_for_empty_values() {
        let patch = TodoInput {
            title: String::new(),
            completed: true,
            order: 0,
        };

        let merged = existing().merge_patch("todo-1", patch);

        assert_eq!(
            merged,
            Todo {
                id: "todo-1".to_string(),
                title: "A".to_string(),
                completed: true,
                order: 5,
                url: "U".to_string(),
            }
        );
    }

    #[test]
    fn test_merge_patch_overwrites_non_empty_values() {
        let patch = TodoInput {
            title: "B".to_string(),
            completed: false,
            order: 9,
        };

        let merged = existing().merge_patch("todo-1", patch);

        assert_eq!(merged.title, "B");
        assert_eq!(merged.order, 9);
        assert_eq!(merged.url, "U");
    }

    #[test]
    fn test_merge_patch_resets_completed_when_omitted() {
        let mut stored = existing();
        stored.completed = true;

        let merged = stored.merge_patch("todo-1", TodoInput::default());

        assert!(!merged.completed);
    }

    #[test]
    fn test_merge_patch_negative_order_overwrites() {
        let patch = TodoInput {
            order: -1,
            ..TodoInput::default()
        };

        let merged = existing().merge_patch("todo-1", patch);

        assert_eq!(merged.order, -1);
    }

    #[test]
    fn test_todo_json_field_names() {
        let value = serde_json::to_value(existing()).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "todo-1",
                "title": "A",
                "completed": false,
                "order": 5,
                "url": "U"
            })
        );
    }

    #[test]
    fn test_todo_deserialize_defaults_missing_fields() {
        let todo: Todo = serde_json::from_value(json!({"title": "only title"})).unwrap();

        assert_eq!(todo.title, "only title");
        assert!(!todo.completed);
        assert_eq!(todo.order, 0);
        assert!(todo.id.is_empty());
        assert!(todo.url.is_empty());
    }

    /// クライアントが送ったid/urlは入力として受け付けない
    #[test]
    fn test_todo_input_ignores_id_and_url() {
        let input: TodoInput = serde_json::from_value(json!({
            "id": "evil",
            "url": "https://evil.example.com",
            "title": "x",
            "order": 2
        }))
        .unwrap();

        assert_eq!(
            input,
            TodoInput {
                title: "x".to_string(),
                completed: false,
                order: 2,
            }
        );
    }

    /// nullのフィールドは未指定と同じく既存値を消さない
    #[test]
    fn test_merge_patch_with_null_fields_keeps_title_and_order() {
        let patch: TodoInput = serde_json::from_value(json!({
            "title": null,
            "order": null,
            "completed": true
        }))
        .unwrap();

        assert_eq!(
            patch,
            TodoInput {
                title: String::new(),
                completed: true,
                order: 0,
            }
        );

        let merged = existing().merge_patch("todo-1", patch);

        assert_eq!(merged.title, "A");
        assert_eq!(merged.order, 5);
        assert!(merged.completed);
        assert_eq!(merged.url, "U");
    }

    #[test]
    fn test_todo_input_null_completed_is_false() {
        let input: TodoInput =
            serde_json::from_value(json!({"title": "x", "completed": null})).unwrap();

        assert_eq!(input.title, "x");
        assert!(!input.completed);
    }
}
