use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out after {timeout_ms} ms: {url}")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("API responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Shared HTTP client is already initialized")]
    AlreadyInitialized,
}

impl ApiError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ApiError::Http(e) if e.is_connect() => "無法連線到 API 伺服器".to_string(),
            ApiError::Http(_) => "API 請求失敗".to_string(),
            ApiError::Timeout { timeout_ms, .. } => {
                format!("API 請求逾時 ({} ms)", timeout_ms)
            }
            ApiError::Status { status, message } => {
                format!("伺服器回應錯誤 {}: {}", status, message)
            }
            ApiError::IoError(_) => "檔案讀寫失敗".to_string(),
            ApiError::SerializationError(_) => "回應資料格式不正確".to_string(),
            ApiError::ConfigError { message } => format!("配置錯誤: {}", message),
            ApiError::InvalidConfigValueError { field, reason, .. } => {
                format!("配置值 {} 無效: {}", field, reason)
            }
            ApiError::ValidationError { message } => format!("輸入無效: {}", message),
            ApiError::AlreadyInitialized => "共用 HTTP 客戶端已初始化".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ApiError::Http(_) | ApiError::Timeout { .. } => {
                "確認後端服務已啟動，並檢查 API_URL 設定"
            }
            ApiError::Status { status, .. } if *status >= 500 => "稍後再試或檢查後端日誌",
            ApiError::Status { .. } => "檢查請求參數",
            ApiError::IoError(_) => "確認檔案路徑與權限",
            ApiError::SerializationError(_) => "確認 API 版本與客戶端相符",
            ApiError::ConfigError { .. } | ApiError::InvalidConfigValueError { .. } => {
                "檢查 --api-url、--config 或 API_URL 環境變數"
            }
            ApiError::ValidationError { .. } => "月份請使用 YYYY-MM 格式，金額不可為負",
            ApiError::AlreadyInitialized => "在第一次使用前只呼叫一次 install",
        }
    }

    /// CLI 結束碼: 1 輸入/配置錯誤, 2 網路錯誤, 3 伺服器錯誤
    pub fn exit_code(&self) -> i32 {
        match self {
            ApiError::Http(_) | ApiError::Timeout { .. } => 2,
            ApiError::Status { status, .. } if *status >= 500 => 3,
            ApiError::SerializationError(_) => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_includes_server_message() {
        let err = ApiError::Status {
            status: 400,
            message: "month required".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API responded with status 400: month required"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_exit_codes_by_category() {
        let timeout = ApiError::Timeout {
            url: "http://localhost/api".to_string(),
            timeout_ms: 15_000,
        };
        assert_eq!(timeout.exit_code(), 2);

        let server = ApiError::Status {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(server.exit_code(), 3);
        assert_eq!(ApiError::AlreadyInitialized.exit_code(), 1);
    }
}
