// TodoBackendサービス設定
//
// Lambdaのコールドスタート時に一度だけ環境変数から読み込み、
// 以降は読み取り専用でハンドラーに注入する。

use thiserror::Error;
use url::Url;

/// 外部公開ベースURLの環境変数名
pub const REST_API_ENV: &str = "REST_API";

/// CORS許可オリジンの環境変数名
pub const CORS_ALLOW_ORIGIN_ENV: &str = "CORS_ALLOW_ORIGIN";

/// CORS許可オリジンのデフォルト値（TodoBackendのテストハーネス）
pub const DEFAULT_CORS_ALLOW_ORIGIN: &str = "https://www.todobackend.com";

/// サービス設定のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid base URL in {name}: {reason}")]
    InvalidBaseUrl { name: String, reason: String },
}

/// サービス設定
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// API Gatewayの外部公開ベースURL（末尾`/`なし）
    rest_api_url: String,
    /// Access-Control-Allow-Originに設定するオリジン
    cors_allow_origin: String,
}

impl ServiceConfig {
    /// 環境変数から設定を読み込み
    ///
    /// - REST_API: 外部公開ベースURL（必須、http/httpsの絶対URL）
    /// - CORS_ALLOW_ORIGIN: CORS許可オリジン（デフォルト: https://www.todobackend.com）
    pub fn from_env() -> Result<Self, ServiceConfigError> {
        let rest_api_url = std::env::var(REST_API_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ServiceConfigError::MissingEnvVar(REST_API_ENV.to_string()))?;

        Self::new(rest_api_url, cors_allow_origin_from_env())
    }

    /// 明示的な値で作成（ベースURLは検証する）
    pub fn new(
        rest_api_url: impl Into<String>,
        cors_allow_origin: impl Into<String>,
    ) -> Result<Self, ServiceConfigError> {
        let rest_api_url = validate_base_url(REST_API_ENV, rest_api_url.into())?;

        Ok(Self {
            rest_api_url,
            cors_allow_origin: cors_allow_origin.into(),
        })
    }

    /// 外部公開ベースURLを取得
    pub fn rest_api_url(&self) -> &str {
        &self.rest_api_url
    }

    /// CORS許可オリジンを取得
    pub fn cors_allow_origin(&self) -> &str {
        &self.cors_allow_origin
    }
}

/// CORS許可オリジンのみを環境変数から読み込み（未設定・空はデフォルト値）
///
/// REST_APIを参照しないアイテムLambdaはこちらを使う。
pub fn cors_allow_origin_from_env() -> String {
    std::env::var(CORS_ALLOW_ORIGIN_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CORS_ALLOW_ORIGIN.to_string())
}

/// ベースURLがhttp(s)の絶対URLであることを検証し、末尾の`/`を除去して返す
fn validate_base_url(name: &str, value: String) -> Result<String, ServiceConfigError> {
    let invalid = |reason: String| ServiceConfigError::InvalidBaseUrl {
        name: name.to_string(),
        reason,
    };

    let parsed = Url::parse(value.trim()).map_err(|e| invalid(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme: {}", other))),
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }

    Ok(value.trim().trim_end_matches('/').to_string())
}
