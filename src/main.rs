#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use anyhow::{Context, Result};
use clap::Parser;
use dossier_client::app::dispatch;
use dossier_client::cli::Cli;
use dossier_client::config::ClientConfig;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn log_level(config: &ClientConfig, verbose: bool) -> Level {
    if verbose {
        return Level::DEBUG;
    }
    config.log_level.trim().parse().unwrap_or(Level::INFO)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ClientConfig::load_or_init()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(&config, cli.verbose))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    dispatch(cli, config).await
}
