/// JSON型付きオブジェクトアクセサー
///
/// ObjectStoreの上にJSONのシリアライズ/デシリアライズを重ね、
/// ハンドラーから型付きで読み書きできるようにする。
/// コレクション・アイテム両ハンドラーは同じアクセサーを共有する。
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::object_store::{ObjectStore, StoreError};

/// アクセサー操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AccessorError {
    /// 指定キーのオブジェクトが存在しない
    #[error("Object not found: {0}")]
    NotFound(String),

    /// ストア操作に失敗
    #[error(transparent)]
    Store(#[from] StoreError),

    /// JSONのシリアライズ/デシリアライズに失敗
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// ObjectStoreに対する型付きアクセサー
#[derive(Debug, Clone)]
pub struct ObjectAccessor<S>
where
    S: ObjectStore,
{
    store: S,
}

impl<S> ObjectAccessor<S>
where
    S: ObjectStore,
{
    /// 新しいObjectAccessorを作成
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// キーに対応するオブジェクトを取得してデシリアライズ
    ///
    /// 存在しない場合は`AccessorError::NotFound`を返す。
    pub async fn get<T>(&self, key: &str) -> Result<T, AccessorError>
    where
        T: DeserializeOwned,
    {
        let body = self
            .store
            .get(key)
            .await?
            .ok_or_else(|| AccessorError::NotFound(key.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| AccessorError::Serialization(e.to_string()))
    }

    /// バケット内の全オブジェクトを取得
    ///
    /// 列挙した各オブジェクトを新しい`T`としてデシリアライズする。
    /// 列挙後・取得前に削除されたオブジェクトは結果から除外する。
    pub async fn get_all<T>(&self) -> Result<Vec<T>, AccessorError>
    where
        T: DeserializeOwned,
    {
        let keys = self.store.list_keys().await?;
        let mut values = Vec::with_capacity(keys.len());

        for key in keys {
            match self.store.get(&key).await? {
                Some(body) => {
                    let value = serde_json::from_slice(&body)
                        .map_err(|e| AccessorError::Serialization(format!("{}: {}", key, e)))?;
                    values.push(value);
                }
                None => {
                    debug!(key = %key, "列挙後に削除されたオブジェクトをスキップ");
                }
            }
        }

        Ok(values)
    }

    /// オブジェクトをJSONとして保存（上書き）
    pub async fn save<T>(&self, key: &str, value: &T) -> Result<(), AccessorError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let body =
            serde_json::to_vec(value).map_err(|e| AccessorError::Serialization(e.to_string()))?;
        self.store.put(key, body).await?;
        Ok(())
    }

    /// オブジェクトを削除
    pub async fn delete(&self, key: &str) -> Result<(), AccessorError> {
        self.store.delete(key).await?;
        Ok(())
    }

    /// 全オブジェクトを削除
    pub async fn delete_all(&self) -> Result<(), AccessorError> {
        self.store.delete_all().await?;
        Ok(())
    }
}
