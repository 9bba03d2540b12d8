use crate::config::ApiConfig;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::{validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientFileConfig {
    pub api: ApiSection,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    pub url: String,
    pub headers: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
}

impl ClientFileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ApiError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ApiError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_URL})；未定義的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ApiError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    /// 轉換成客戶端配置；逾時固定，不從檔案讀取
    pub fn into_api_config(self) -> Result<ApiConfig> {
        self.validate()?;
        let headers = self.api.headers.unwrap_or_default();
        Ok(ApiConfig::new(&self.api.url)?.with_headers(headers))
    }
}

impl Validate for ClientFileConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.url", &self.api.url)?;

        if let Some(headers) = &self.api.headers {
            for (name, value) in headers {
                if reqwest::header::HeaderName::from_bytes(name.as_bytes()).is_err()
                    || reqwest::header::HeaderValue::from_str(value).is_err()
                {
                    return Err(ApiError::InvalidConfigValueError {
                        field: "api.headers".to_string(),
                        value: format!("{}: {}", name, value),
                        reason: "Invalid HTTP header".to_string(),
                    });
                }
            }
        }

        if let Some(level) = self.log_level() {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level) {
                return Err(ApiError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[api]
url = "https://budget.example.com/api"
headers = { "Accept-Language" = "zh-TW" }

[logging]
level = "debug"
"#;

        let config = ClientFileConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.url, "https://budget.example.com/api");
        assert_eq!(config.log_level(), Some("debug"));

        let api = config.into_api_config().unwrap();
        assert_eq!(api.timeout_ms(), 15_000);
        assert_eq!(
            api.default_headers.get("Accept-Language").map(String::as_str),
            Some("zh-TW")
        );
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BUDGET_TEST_TOML_API_URL", "http://10.1.1.1:5000/api");

        let toml_content = r#"
[api]
url = "${BUDGET_TEST_TOML_API_URL}"
"#;

        let config = ClientFileConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.url, "http://10.1.1.1:5000/api");

        std::env::remove_var("BUDGET_TEST_TOML_API_URL");
    }

    #[test]
    fn test_undefined_variable_fails_validation() {
        let toml_content = r#"
[api]
url = "${BUDGET_TEST_UNDEFINED_VARIABLE}"
"#;

        let config = ClientFileConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.url, "${BUDGET_TEST_UNDEFINED_VARIABLE}");
        assert!(config.into_api_config().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let toml_content = r#"
[api]
url = "http://localhost:5000/api"

[logging]
level = "loud"
"#;

        let config = ClientFileConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nurl = \"http://localhost:5000/api\"\n")
            .unwrap();

        let config = ClientFileConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api.url, "http://localhost:5000/api");
        assert!(config.logging.is_none());
    }
}
