//! PailotPH command-line entry point

use anyhow::{Context, Result};
use clap::Parser;
use pailot::commands::{self, Cli, CommandResult};
use pailot::{App, AppConfig};
use serde_json::Value;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn execute(cli: Cli) -> Result<Value> {
    let config = AppConfig::from_env().context("loading configuration")?;
    tracing::debug!(
        "Backend {} (sandbox: {})",
        config.backend_url,
        config.sandbox
    );

    let app = App::from_config(config)?;
    commands::run(cli.command, app).await
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pailot=info,pailot_platform=info,pailot_payments=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let (result, code) = match execute(cli).await {
        Ok(data) => (CommandResult::ok(data), ExitCode::SUCCESS),
        Err(e) => {
            tracing::error!("{:#}", e);
            (CommandResult::err(format!("{:#}", e)), ExitCode::FAILURE)
        }
    };

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to encode output: {}", e);
            return ExitCode::FAILURE;
        }
    }

    code
}
