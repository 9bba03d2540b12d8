use crate::utils::error::{ApiError, Result};
use chrono::NaiveDate;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<Url> {
    if url_str.trim().is_empty() {
        return Err(ApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str.trim()) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ApiError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// 解析 `YYYY-MM`，回傳該月 1 日
pub fn validate_month(field_name: &str, month: &str) -> Result<NaiveDate> {
    let invalid = || ApiError::ValidationError {
        message: format!("{} must be YYYY-MM, got '{}'", field_name, month),
    };

    let (year, mon) = month.trim().split_once('-').ok_or_else(invalid)?;
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if year.len() != 4 || mon.len() != 2 || !all_digits(year) || !all_digits(mon) {
        return Err(invalid());
    }
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let mon: u32 = mon.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, mon, 1).ok_or_else(invalid)
}

/// 截止月份含當月，因此允許與起始月份相同
pub fn validate_month_range(start_month: &str, end_month: Option<&str>) -> Result<()> {
    let start = validate_month("start_month", start_month)?;
    if let Some(end_month) = end_month {
        let end = validate_month("end_month", end_month)?;
        if end < start {
            return Err(ApiError::ValidationError {
                message: format!(
                    "end_month {} is before start_month {}",
                    end_month, start_month
                ),
            });
        }
    }
    Ok(())
}

pub fn validate_amount(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::ValidationError {
            message: format!("{} must be a non-negative number, got {}", field_name, value),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(ApiError::ValidationError {
            message: format!("{} must be at least {}, got {}", field_name, min_value, value),
        });
    }
    Ok(())
}
