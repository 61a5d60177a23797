//! Funding Offer Auto-Renew Bot - Entry Point
//!
//! Cancels stale lending offers, replans the allocation from a fresh
//! funding book snapshot and resubmits, once per interval.

use anyhow::Result;
use clap::Parser;
use lender_exchange::{Credentials, FundingClient};
use lender_telemetry::{NullNotifier, TelegramNotifier};
use std::sync::Arc;
use tracing::info;

/// Funding Offer Auto-Renew Bot
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via LENDER_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Run a single cycle and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    lender_telemetry::init_logging()?;

    info!("Starting lender-bot v{}", env!("CARGO_PKG_VERSION"));

    // Determine config path: CLI arg > LENDER_CONFIG env var > default
    let config = match args.config {
        Some(path) => lender_bot::AppConfig::from_file(&path)?,
        None => lender_bot::AppConfig::load()?,
    };
    info!(
        currency = %config.currency,
        split = config.strategy.split,
        interval_secs = config.interval_secs,
        "Configuration loaded"
    );

    // Credentials come from the environment only, never the config file.
    let credentials = Credentials::from_env()?;
    let client = Arc::new(FundingClient::new(Some(credentials))?);

    let notifier: Arc<dyn lender_telemetry::Notifier> = match TelegramNotifier::from_env()? {
        Some(telegram) => {
            info!("Telegram notifications enabled");
            Arc::new(telegram)
        }
        None => {
            info!("Telegram notifications disabled (TELEGRAM_BOT_TOKEN not set)");
            Arc::new(NullNotifier)
        }
    };

    let app = lender_bot::Application::new(config, client.clone(), client, notifier)?;

    if args.once {
        let report = app.run_cycle().await?;
        info!(offers = report.offers_placed, "Single cycle completed");
        return Ok(());
    }

    app.run().await?;

    Ok(())
}
