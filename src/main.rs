use budget_api_client::config::cli::{Command, RulesCommand};
use budget_api_client::utils::logger;
use budget_api_client::{http, ApiError, BudgetApi, CliConfig};
use clap::Parser;
use serde::Serialize;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    let file_config = match config.file_config() {
        Ok(file) => file,
        Err(e) => exit_with(&e),
    };

    let level = file_config.as_ref().and_then(|f| f.log_level());
    logger::init_logger(config.log_format(), config.verbose, level);

    tracing::debug!("CLI config: {:?}", config);

    let api_config = match config.resolve_api_config(file_config) {
        Ok(api_config) => api_config,
        Err(e) => exit_with(&e),
    };

    // 之後所有呼叫都共用同一個客戶端
    let client = match http::install(api_config) {
        Ok(client) => client,
        Err(e) => exit_with(&e),
    };
    tracing::info!(
        "Using API at {} (timeout {} ms)",
        client.base_url(),
        client.timeout().as_millis()
    );

    if let Err(e) = run(&config.command, BudgetApi::new(client)).await {
        exit_with(&e);
    }
}

async fn run(command: &Command, api: BudgetApi<'_>) -> Result<(), ApiError> {
    match command {
        Command::Health => print_json(&api.health().await?),
        Command::Rules(RulesCommand::List) => print_json(&api.list_rules().await?),
        Command::Rules(RulesCommand::Add(args)) => {
            print_json(&api.create_rule(&args.to_new_rule()).await?)
        }
        Command::Rules(RulesCommand::Delete { id }) => print_json(&api.delete_rule(*id).await?),
        Command::Autofill { month } => print_json(&api.autofill(month).await?),
        Command::Curve(args) => {
            let curve = api.plan_curve(&args.to_request()).await?;
            if let Some(wealth) = curve.final_wealth() {
                tracing::info!(
                    "Projected wealth after {} years: {:.2}",
                    curve.params.years,
                    wealth
                );
            }
            print_json(&curve)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ApiError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_with(e: &ApiError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
