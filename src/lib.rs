pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{ApiConfig, API_URL_ENV, DEFAULT_API_URL, REQUEST_TIMEOUT_MS};
pub use crate::core::{budget::BudgetApi, http, http::HttpClient};
pub use utils::error::{ApiError, Result};
