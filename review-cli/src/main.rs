//! Review CLI
//!
//! Command-line interface for the Code Review Assistant backend.

mod commands;
mod config;
mod context;
mod project_resolver;
mod types;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "review")]
#[command(about = "AI Code Review Assistant CLI", long_about = None)]
struct Cli {
    /// Backend API URL, including the version prefix
    #[arg(
        long,
        global = true,
        env = "REVIEW_API_URL",
        default_value = review_client::DEFAULT_API_URL
    )]
    api_url: String,

    /// File the session token is kept in
    #[arg(long, global = true, env = "REVIEW_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Seconds between analysis status checks
    #[arg(long, global = true, env = "REVIEW_POLL_INTERVAL", default_value_t = 3)]
    poll_interval: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "review_cli=warn,review_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        token_file: cli.token_file.unwrap_or_else(config::default_token_file),
        poll_interval: Duration::from_secs(cli.poll_interval),
    };
    config.validate()?;
    debug!(
        "Using API {} with token file {}",
        config.api_url,
        config.token_file.display()
    );

    handle_command(cli.command, &config).await
}
