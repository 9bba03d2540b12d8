use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    /// 結構化 JSON，給在容器或收集器後面執行的情境
    Json,
}

pub(crate) fn default_filter(verbose: bool, level: Option<&str>) -> String {
    match (verbose, level) {
        (true, _) => "budget_api_client=debug,info".to_string(),
        (false, Some(level)) => format!("budget_api_client={}", level),
        (false, None) => "budget_api_client=info".to_string(),
    }
}

/// 初始化日誌；RUST_LOG 優先於預設過濾器
pub fn init_logger(format: LogFormat, verbose: bool, level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, level)));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false, None), "budget_api_client=info");
        assert_eq!(default_filter(false, Some("warn")), "budget_api_client=warn");
        assert_eq!(default_filter(true, Some("warn")), "budget_api_client=debug,info");
    }
}
