//! Spendsight CLI - Spending analytics from transaction exports
//!
//! Usage:
//!   spendsight recurring --file txns.csv              Detect recurring payments
//!   spendsight budgets --file txns.csv -b budgets.json Project month-end spending
//!   spendsight alerts --file txns.csv -b budgets.json  Show budget alerts
//!   spendsight insights --file txns.csv                Behavioral insights
//!   spendsight report --file txns.csv                  Everything at once

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let as_of = cli.as_of.as_deref();
    match cli.command {
        Commands::Recurring => commands::cmd_recurring(&cli.file, as_of, cli.json),
        Commands::Budgets { budgets } => {
            commands::cmd_budgets(&cli.file, &budgets, as_of, cli.json)
        }
        Commands::Alerts { budgets } => commands::cmd_alerts(&cli.file, &budgets, as_of, cli.json),
        Commands::Insights => commands::cmd_insights(&cli.file, as_of, cli.json),
        Commands::Report { budgets } => {
            commands::cmd_report(&cli.file, budgets.as_deref(), as_of, cli.json)
        }
    }
}
