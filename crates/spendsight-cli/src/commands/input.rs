//! Input loading and validation
//!
//! Transactions come from a CSV export with columns
//! `date,merchant,category,amount`; budgets from a JSON array. Rows are
//! validated before analysis and sorted chronologically, since merchant
//! grouping is order-sensitive.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use spendsight_core::{Budget, Transaction};
use tracing::debug;

#[derive(Deserialize)]
struct CsvRecord {
    date: String,
    merchant: String,
    #[serde(default)]
    category: Option<String>,
    amount: f64,
}

/// Load, validate, and chronologically sort transactions from a CSV file.
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open transaction file: {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut transactions = Vec::new();
    for (i, row) in reader.deserialize::<CsvRecord>().enumerate() {
        let line = i + 2; // header is line 1
        let record = row.with_context(|| format!("Malformed CSV row at line {}", line))?;

        let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}' at line {}", record.date, line))?;
        let category = record.category.filter(|c| !c.trim().is_empty());

        let tx = Transaction::new(date, record.merchant.trim(), category, record.amount);
        tx.validate()
            .with_context(|| format!("Invalid transaction at line {}", line))?;
        transactions.push(tx);
    }

    transactions.sort_by_key(|t| t.date);
    debug!(count = transactions.len(), "Loaded transactions");
    Ok(transactions)
}

/// Load and validate budgets from a JSON array file.
pub fn load_budgets(path: &Path) -> Result<Vec<Budget>> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open budget file: {}", path.display()))?;
    let budgets: Vec<Budget> =
        serde_json::from_reader(file).context("Budget file must be a JSON array of budgets")?;

    for budget in &budgets {
        budget
            .validate()
            .with_context(|| format!("Invalid budget for category '{}'", budget.category))?;
    }

    debug!(count = budgets.len(), "Loaded budgets");
    Ok(budgets)
}

/// Resolve the analysis reference date: `--as-of` if given, else today.
pub fn resolve_as_of(as_of: Option<&str>) -> Result<NaiveDate> {
    match as_of {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --as-of date format (use YYYY-MM-DD)"),
        None => Ok(Local::now().date_naive()),
    }
}
