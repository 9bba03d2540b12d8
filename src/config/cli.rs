use crate::config::toml_config::ClientFileConfig;
use crate::config::ApiConfig;
use crate::domain::model::{FlowType, NewBudgetRule, PlanCurveRequest};
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "budget-api")]
#[command(about = "Command line client for the budget planning API")]
pub struct CliConfig {
    #[arg(long, global = true, help = "API base URL (overrides --config and API_URL)")]
    pub api_url: Option<String>,

    #[arg(long, global = true, help = "TOML client configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check that the backend is reachable
    Health,
    /// Manage recurring budget rules
    #[command(subcommand)]
    Rules(RulesCommand),
    /// Materialize a month's rules as budget entries
    Autofill {
        /// Month in YYYY-MM format
        month: String,
    },
    /// Project wealth over time from the budget rules
    Curve(CurveArgs),
}

#[derive(Debug, Clone, Subcommand)]
pub enum RulesCommand {
    List,
    Add(NewRuleArgs),
    Delete {
        id: i64,
    },
}

#[derive(Debug, Clone, Args)]
pub struct NewRuleArgs {
    /// income or expense
    #[arg(long = "type", default_value = "expense")]
    pub kind: FlowType,
    #[arg(long, default_value = "")]
    pub category: String,
    #[arg(long)]
    pub amount: f64,
    /// First month the rule applies, YYYY-MM
    #[arg(long)]
    pub start_month: String,
    /// Last month the rule applies (inclusive), YYYY-MM
    #[arg(long)]
    pub end_month: Option<String>,
    #[arg(long, default_value = "0")]
    pub growth_rate: f64,
    #[arg(long)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct CurveArgs {
    #[arg(long, default_value = "30")]
    pub years: u32,
    #[arg(long, default_value = "0.06")]
    pub annual_return: f64,
    #[arg(long)]
    pub start_value: Option<f64>,
}

impl CliConfig {
    /// 讀取配置檔；未指定時回傳 None
    pub fn file_config(&self) -> Result<Option<ClientFileConfig>> {
        self.config
            .as_ref()
            .map(ClientFileConfig::from_file)
            .transpose()
    }

    pub fn log_format(&self) -> LogFormat {
        if self.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }

    /// 優先順序: --api-url > --config > API_URL > 預設值
    pub fn resolve_api_config(&self, file: Option<ClientFileConfig>) -> Result<ApiConfig> {
        match (&self.api_url, file) {
            (Some(url), file) => {
                let headers = file
                    .and_then(|f| f.api.headers)
                    .unwrap_or_default();
                Ok(ApiConfig::new(url)?.with_headers(headers))
            }
            (None, Some(file)) => file.into_api_config(),
            (None, None) => ApiConfig::from_env(),
        }
    }
}

impl NewRuleArgs {
    pub fn to_new_rule(&self) -> NewBudgetRule {
        NewBudgetRule {
            kind: self.kind,
            category: self.category.clone(),
            amount: self.amount,
            start_month: self.start_month.clone(),
            end_month: self.end_month.clone(),
            growth_rate: self.growth_rate,
            note: self
                .note
                .as_ref()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        }
    }
}

impl CurveArgs {
    pub fn to_request(&self) -> PlanCurveRequest {
        PlanCurveRequest {
            years: self.years,
            annual_return: self.annual_return,
            start_value: self.start_value,
        }
    }
}
