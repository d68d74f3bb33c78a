//! # Shopfront CLI
//!
//! Command-line composition root for the cart and catalog stores.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Startup Sequence                                 │
//! │                                                                         │
//! │  1. init_tracing()          RUST_LOG, default info,shopfront=debug     │
//! │  2. Cli::parse()            subcommand + --config                      │
//! │  3. ShopConfig::load()      defaults → TOML → SHOPFRONT_* env          │
//! │  4. App::open()             FileStore + CartStore::hydrate             │
//! │  5. dispatch()              catalog store started only when needed    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr so command output on stdout stays pipeable.

mod args;
mod commands;
mod error;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use shopfront_store::ShopConfig;

use crate::args::Cli;
use crate::commands::App;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    debug!(?cli, "Parsed arguments");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ShopConfig::load(cli.config).map_err(CliError::Config)?;
    debug!(
        api_url = config.api_url().unwrap_or("<unset>"),
        storage_key = config.storage_key(),
        "Configuration loaded"
    );

    let app = App::open(config).await;
    commands::dispatch(&app, cli.command).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopfront_store=trace` - Trace the stores only
/// - Default: `info,shopfront=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopfront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
