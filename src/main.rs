//! Portfolio Site Server
//!
//! Entry point for the portfolio site and its terminal front ends.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_site::commands::{chat_transport, play_terminal, run_chat};
use portfolio_site::config::{AppConfig, Cli, Command};
use portfolio_site::server::start_server;

#[tokio::main]
async fn main() {
    // Initialize tracing (M-LOG-STRUCTURED)
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load .env (if present) before clap reads bound env vars
    let _ = dotenv();

    let cli = Cli::parse();
    let config = match AppConfig::from_cli(&cli) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let command = cli.command.unwrap_or(Command::Serve);
    info!(name: "app.command", command = ?command, "Starting");

    let result = match command {
        Command::Serve => start_server(config).await,
        Command::Terminal => play_terminal(&config, std::io::stdout()).await.map(drop),
        Command::Chat => chat(&config).await,
    };

    if let Err(e) = result {
        error!(name: "app.failed", error = %e, "Command failed");
        std::process::exit(1);
    }
}

async fn chat(config: &AppConfig) -> anyhow::Result<()> {
    let transport = chat_transport(config)?;
    let input = BufReader::new(tokio::io::stdin());
    run_chat(config, transport, input, std::io::stdout()).await?;
    Ok(())
}
