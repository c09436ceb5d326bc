use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use obitpub_cli::{AppConfig, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "obitpub_cli=info,obitpub_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("Failed to initialise logging")?;

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    tracing::debug!(?config, "Configuration loaded");

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();

    match obitpub_cli::run(cli.command, config, &mut stdout, &mut stderr).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("{}", e.status_message());
            if let Some(hint) = e.hint() {
                eprintln!("{hint}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
