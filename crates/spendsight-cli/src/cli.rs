//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spendsight - Spending analytics from transaction exports
#[derive(Parser)]
#[command(name = "spendsight")]
#[command(about = "Analyze spending history for recurring charges, budget risk, and habits", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Transaction CSV file (columns: date,merchant,category,amount)
    #[arg(short, long, global = true, default_value = "transactions.csv")]
    pub file: PathBuf,

    /// Reference date for the analysis (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true)]
    pub as_of: Option<String>,

    /// Emit results as JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect recurring payments (subscriptions, bills)
    Recurring,

    /// Project month-end spending against budgets
    Budgets {
        /// Budget JSON file: [{"category", "amount", "month": "YYYY-MM"}]
        #[arg(short, long)]
        budgets: PathBuf,
    },

    /// Show budget alerts (overruns, surges, unbudgeted spending)
    Alerts {
        /// Budget JSON file: [{"category", "amount", "month": "YYYY-MM"}]
        #[arg(short, long)]
        budgets: PathBuf,
    },

    /// Run the behavioral insight battery
    Insights,

    /// Run the full analysis and print everything
    Report {
        /// Budget JSON file (optional; omit to skip budget sections)
        #[arg(short, long)]
        budgets: Option<PathBuf>,
    },
}
