#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::utils::error::Result;
use crate::utils::validation::validate_url;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// 環境變數名稱
pub const API_URL_ENV: &str = "API_URL";

/// 未設定 API_URL 時使用的後端位址
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";

/// 每個請求的固定逾時
pub const REQUEST_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub(crate) api_url: Url,
    pub(crate) timeout: Duration,
    pub(crate) default_headers: BTreeMap<String, String>,
}

impl ApiConfig {
    pub fn new(api_url: &str) -> Result<Self> {
        Ok(Self {
            api_url: validate_url("api_url", api_url)?,
            timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
            default_headers: BTreeMap::new(),
        })
    }

    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.default_headers = headers;
        self
    }

    /// 從 API_URL 環境變數建立配置
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 空白值視為未設定
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(API_URL_ENV).filter(|value| !value.trim().is_empty()) {
            Some(url) => {
                tracing::debug!("Using {} from environment: {}", API_URL_ENV, url);
                Self::new(&url)
            }
            None => {
                tracing::debug!("{} not set, using default {}", API_URL_ENV, DEFAULT_API_URL);
                Self::new(DEFAULT_API_URL)
            }
        }
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    pub fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_fixed_timeout() {
        let config = ApiConfig::new("https://budget.example.com/api").unwrap();
        assert_eq!(config.api_url.as_str(), "https://budget.example.com/api");
        assert_eq!(config.timeout_ms(), 15_000);
        assert!(config.default_headers.is_empty());
    }

    #[test]
    fn test_from_lookup_reads_api_url() {
        let config = ApiConfig::from_lookup(|key| {
            assert_eq!(key, API_URL_ENV);
            Some("http://10.0.0.2:8000/api".to_string())
        })
        .unwrap();
        assert_eq!(config.api_url.as_str(), "http://10.0.0.2:8000/api");
    }

    #[test]
    fn test_from_lookup_falls_back_to_default() {
        let unset = ApiConfig::from_lookup(|_| None).unwrap();
        assert_eq!(unset.api_url.as_str(), DEFAULT_API_URL);

        let blank = ApiConfig::from_lookup(|_| Some("   ".to_string())).unwrap();
        assert_eq!(blank.api_url.as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn test_from_lookup_rejects_invalid_url() {
        let result = ApiConfig::from_lookup(|_| Some("/api".to_string()));
        assert!(result.is_err());
    }
}
