/// Todo ID生成
///
/// 新規Todoの識別子を決める差し替え可能な機能。
/// 本番ではリクエストのトレースIDをそのまま使い、調整役なしで一意性を得る。
use crate::application::TodoRequest;

/// ID生成トレイト
pub trait IdGenerator: Send + Sync {
    /// リクエストから新しいTodo IDを生成する
    ///
    /// 空文字を返した場合、呼び出し側はIDを割り当てられないものとして扱う。
    fn generate_id(&self, request: &TodoRequest) -> String;
}

/// リクエストIDをTodo IDとして使用する実装
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdGenerator;

impl IdGenerator for RequestIdGenerator {
    fn generate_id(&self, request: &TodoRequest) -> String {
        request.request_id.clone()
    }
}
