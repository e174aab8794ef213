/// ObjectStoreのS3実装
///
/// 1バケット＝1名前空間として、Todoごとに1オブジェクトを保存する。
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use aws_sdk_s3::Client as S3Client;
use tracing::{debug, warn};

use super::object_store::{ObjectStore, StoreError};

/// DeleteObjectsで一度に削除できる最大キー数
const DELETE_BATCH_SIZE: usize = 1000;

/// 保存するオブジェクトのContent-Type
const OBJECT_CONTENT_TYPE: &str = "application/json";

/// S3バケットを使用したObjectStore実装
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    /// S3クライアント
    client: S3Client,
    /// バケット名
    bucket: String,
}

impl S3ObjectStore {
    /// 新しいS3ObjectStoreを作成
    ///
    /// # 引数
    /// * `client` - S3クライアント
    /// * `bucket` - Todoを保存するバケット名
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    /// バケット名を取得
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// キー一覧をDeleteObjects用のバッチに分割
    fn delete_batches(keys: &[String]) -> impl Iterator<Item = &[String]> {
        keys.chunks(DELETE_BATCH_SIZE)
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(err) => {
                // NoSuchKeyは「存在しない」として扱う
                if err
                    .as_service_error()
                    .map(|e| e.is_no_such_key())
                    .unwrap_or(false)
                {
                    debug!(bucket = %self.bucket, key = key, "オブジェクトが存在しない");
                    return Ok(None);
                }
                return Err(StoreError::ReadError(err.to_string()));
            }
        };

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| StoreError::ReadError(e.to_string()))?
            .into_bytes();

        Ok(Some(body.to_vec()))
    }

    async fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| StoreError::ReadError(e.to_string()))?;
            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|object| object.key())
                    .map(str::to_string),
            );
        }

        Ok(keys)
    }

    async fn put(&self, key: &str, body: Vec<u8>) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(OBJECT_CONTENT_TYPE)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StoreError::WriteError(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StoreError::WriteError(e.to_string()))?;

        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        let keys = self.list_keys().await?;

        for batch in Self::delete_batches(&keys) {
            let objects = batch
                .iter()
                .map(|key| ObjectIdentifier::builder().key(key).build())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| StoreError::WriteError(e.to_string()))?;

            let delete = Delete::builder()
                .set_objects(Some(objects))
                .quiet(true)
                .build()
                .map_err(|e| StoreError::WriteError(e.to_string()))?;

            let output = self
                .client
                .delete_objects()
                .bucket(&self.bucket)
                .delete(delete)
                .send()
                .await
                .map_err(|e| StoreError::WriteError(e.to_string()))?;

            // quietモードでは失敗したキーのみが返る
            if let Some(failed) = output.errors().first() {
                warn!(
                    bucket = %self.bucket,
                    failed_count = output.errors().len(),
                    "一括削除で一部のオブジェクトの削除に失敗"
                );
                return Err(StoreError::WriteError(format!(
                    "Failed to delete {}: {}",
                    failed.key().unwrap_or("(unknown)"),
                    failed.message().unwrap_or("(no message)")
                )));
            }
        }

        Ok(())
    }
}
