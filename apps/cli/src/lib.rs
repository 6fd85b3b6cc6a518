//! # Wholesale CLI
//!
//! Terminal front end for the wholesale sales ledger.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        wholesale binary                                 │
//! │                                                                         │
//! │  Cli::parse()  →  AppConfig (file + env + flags)  →  SaleStore          │
//! │                                                       │                 │
//! │                                   ┌───────────────────┴──────────┐      │
//! │                                   ▼                              ▼      │
//! │                          SaleRepository (SQLite)     InMemorySaleStore  │
//! │                                                                         │
//! │  command  →  wholesale-core pricing/aggregation  →  Report (tables/JSON) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Log Levels
//! Logs go to stderr so `--json` output on stdout stays parseable.
//! - `RUST_LOG=debug` - Show debug messages
//! - `RUST_LOG=wholesale_db=trace` - Trace the storage layer only
//! - `RUST_LOG=wholesale_cli=info` - Log each recorded, updated or deleted sale
//! - Default: warnings only

pub mod cli;
pub mod config;
pub mod error;
pub mod output;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

/// Parses arguments, runs one command, prints its output.
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let json = cli.global.json;
    match cli.run().await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if json {
                match serde_json::to_string(&err) {
                    Ok(body) => eprintln!("{}", body),
                    Err(_) => eprintln!("error: {}", err.message),
                }
            } else {
                eprintln!("error: {}", err.message);
            }
            err.exit_code()
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,sqlx=error")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
