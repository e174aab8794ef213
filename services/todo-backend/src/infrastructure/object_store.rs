/// オブジェクトストア（キー・バリュー型Blobストア）の抽象化
///
/// 1つのバケット（名前空間）に対して、キー単位でバイト列を読み書きする。
/// 本番実装は`S3ObjectStore`、テストではインメモリのモックを使用する。
use async_trait::async_trait;
use thiserror::Error;

/// ストア操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// ストアからの読み取りに失敗
    #[error("Read error: {0}")]
    ReadError(String),

    /// ストアへの書き込み・削除に失敗
    #[error("Write error: {0}")]
    WriteError(String),
}

/// Blobストア操作用トレイト
///
/// すべての操作は単発で、トランザクションや楽観ロックは提供しない。
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// キーに対応するオブジェクトを取得
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(Some(bytes))`
    /// * 見つからなかった場合は`Ok(None)`
    /// * 失敗時は`Err(StoreError)`
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// バケット内の全キーを列挙
    async fn list_keys(&self) -> Result<Vec<String>, StoreError>;

    /// オブジェクトを保存（存在する場合は全体を上書き）
    async fn put(&self, key: &str, body: Vec<u8>) -> Result<(), StoreError>;

    /// オブジェクトを削除（存在しない場合も成功）
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// バケット内の全オブジェクトを削除（空の場合も成功）
    async fn delete_all(&self) -> Result<(), StoreError>;
}
