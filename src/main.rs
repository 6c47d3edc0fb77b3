//! Binary entry point for the banner rotation service.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use banner_rotation::{config, logging, server};

#[derive(Parser)]
#[command(name = "banner-rotation")]
#[command(author, version, about = "Banner rotation service with UCB1 selection")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, default_value = "./configs/config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print version information and exit.
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        println!(
            "{} {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        );
        return Ok(());
    }

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Failed to load .env: {} (using system environment)", e);
    }

    let config = config::load(Some(&cli.config))?;

    let logging = logging::init(&config.logger);
    let _guard = logging.guard;
    if let Some(warning) = logging.warning {
        tracing::warn!("{warning}");
    }

    tracing::info!("banner rotation service starting");
    config.print_summary();

    server::run(config).await
}
