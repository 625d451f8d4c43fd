//! CLI for livewatch
//!
//! Loads the configuration file, starts every checker, and runs until
//! SIGINT or SIGTERM.

use std::process::ExitCode;

use clap::Parser;
use livewatch::config::load_config;
use livewatch::daemon;
use livewatch::utils::AppResult;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "livewatch", version, about = "Poll HTTP endpoints and report liveness changes")]
struct Cli {
    /// Path to the configuration file (YAML, TOML or JSON)
    #[arg(short, long)]
    config: String,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    livewatch::utils::logging::init(&cli.log_level);

    match run(&cli.config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("livewatch failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config_path: &str) -> AppResult<()> {
    let settings = load_config(config_path)?;
    info!(config = %config_path, targets = settings.targets.len(), "configuration loaded");
    daemon::run(settings).await
}
