use crate::config::ApiConfig;
use crate::utils::error::{ApiError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

static SHARED_CLIENT: OnceLock<HttpClient> = OnceLock::new();

/// 綁定 base URL 與固定逾時的 HTTP 客戶端
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: ApiConfig,
}

impl HttpClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in config.default_headers() {
            let invalid = |reason: String| ApiError::InvalidConfigValueError {
                field: "default_headers".to_string(),
                value: format!("{}: {}", name, value),
                reason,
            };
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
            headers.insert(header_name, header_value);
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        tracing::debug!(
            "Built HTTP client for {} (timeout {} ms)",
            config.api_url(),
            config.timeout_ms()
        );

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &Url {
        self.config.api_url()
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout()
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// 底層 reqwest 客戶端，給需要自訂請求的呼叫端
    pub fn inner(&self) -> &Client {
        &self.client
    }

    pub fn resolve(&self, path: &str) -> Result<Url> {
        resolve_url(self.base_url(), path)
    }

    /// 以伺服器根目錄解析路徑，忽略 base URL 的路徑前綴
    pub fn origin_url(&self, path: &str) -> Result<Url> {
        let absolute = format!("/{}", path.trim_start_matches('/'));
        self.base_url()
            .join(&absolute)
            .map_err(|e| invalid_path(path, e.to_string()))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.resolve(path)?;
        self.request_json::<(), T>(Method::GET, url, None).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.resolve(path)?;
        self.request_json(Method::POST, url, Some(body)).await
    }

    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.resolve(path)?;
        self.request_json::<(), T>(Method::DELETE, url, None).await
    }

    pub async fn request_json<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(e, &url))?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Failed to read error body from {}: {}", url, e);
                    String::new()
                }
            };
            let message = error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });
            tracing::warn!("Request to {} failed with {}: {}", url, status, message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e, &url))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn transport_error(&self, error: reqwest::Error, url: &Url) -> ApiError {
        if error.is_timeout() {
            tracing::warn!("Request to {} timed out after {} ms", url, self.config.timeout_ms());
            ApiError::Timeout {
                url: url.to_string(),
                timeout_ms: self.config.timeout_ms(),
            }
        } else {
            ApiError::Http(error)
        }
    }
}

/// 絕對 URL 原樣使用；相對路徑以單一 `/` 接在 base URL 之後
pub fn resolve_url(base: &Url, path: &str) -> Result<Url> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(base.clone());
    }

    if let Ok(absolute) = Url::parse(path) {
        if matches!(absolute.scheme(), "http" | "https") {
            return Ok(absolute);
        }
    }

    let combined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&combined).map_err(|e| invalid_path(path, e.to_string()))
}

fn invalid_path(path: &str, reason: String) -> ApiError {
    ApiError::InvalidConfigValueError {
        field: "path".to_string(),
        value: path.to_string(),
        reason,
    }
}

/// 後端錯誤格式為 `{"error": "..."}`，其他情況使用原始內容
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) {
        if let Some(serde_json::Value::String(message)) = map.get("error") {
            return Some(message.clone());
        }
    }

    Some(body.to_string())
}

/// 取得共用客戶端；第一次呼叫時由 API_URL 環境變數建立
pub fn shared() -> Result<&'static HttpClient> {
    if let Some(client) = SHARED_CLIENT.get() {
        return Ok(client);
    }

    let client = HttpClient::new(ApiConfig::from_env()?)?;
    Ok(SHARED_CLIENT.get_or_init(|| client))
}

/// 以指定配置初始化共用客戶端，只能在第一次使用前呼叫
pub fn install(config: ApiConfig) -> Result<&'static HttpClient> {
    let client = HttpClient::new(config)?;

    let mut installed = false;
    let shared = SHARED_CLIENT.get_or_init(|| {
        installed = true;
        client
    });

    if installed {
        tracing::info!("Shared HTTP client installed for {}", shared.base_url());
        Ok(shared)
    } else {
        Err(ApiError::AlreadyInitialized)
    }
}

pub fn is_initialized() -> bool {
    SHARED_CLIENT.get().is_some()
}
