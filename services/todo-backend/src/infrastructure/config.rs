/// S3接続設定
use aws_sdk_s3::Client as S3Client;
use thiserror::Error;

/// S3設定のエラー型
#[derive(Debug, Error)]
pub enum S3ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Todo保存先のバケット名を保持する環境変数名
pub const TODO_BUCKET_ENV: &str = "TODO_BUCKET";

/// バケット名とクライアントを持つS3設定
///
/// バケット名は環境変数`TODO_BUCKET`で設定する。
#[derive(Debug, Clone)]
pub struct S3Config {
    /// S3クライアントインスタンス
    client: S3Client,
    /// Todo保存用バケット名
    bucket: String,
}

impl S3Config {
    /// 環境からAWS設定を読み込み、環境変数からバケット名を読み取って新しいS3Configを作成
    ///
    /// 環境変数:
    /// - AWS認証情報: aws-configにより自動読み込み
    /// - TODO_BUCKET: Todo保存用S3バケット名
    pub async fn from_env() -> Result<Self, S3ConfigError> {
        let bucket = std::env::var(TODO_BUCKET_ENV)
            .ok()
            .filter(|b| !b.trim().is_empty())
            .ok_or_else(|| S3ConfigError::MissingEnvVar(TODO_BUCKET_ENV.to_string()))?;

        // 環境からAWS設定を読み込み（認証情報、リージョンなど）
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = S3Client::new(&aws_config);

        Ok(Self { client, bucket })
    }

    /// 明示的な値で新しいS3Configを作成（テスト用）
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    /// S3クライアントへの参照を取得
    pub fn client(&self) -> &S3Client {
        &self.client
    }

    /// バケット名を取得
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}
