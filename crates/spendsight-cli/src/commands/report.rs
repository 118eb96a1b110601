//! Full analysis report command

use std::path::Path;

use anyhow::Result;
use spendsight_core::SpendingAnalyzer;

use super::budgets::{print_alerts, print_predictions};
use super::input::{load_budgets, load_transactions, resolve_as_of};
use super::insights::print_insights;
use super::recurring::print_patterns;

pub fn cmd_report(
    file: &Path,
    budgets: Option<&Path>,
    as_of: Option<&str>,
    json: bool,
) -> Result<()> {
    let transactions = load_transactions(file)?;
    let budgets = match budgets {
        Some(path) => load_budgets(path)?,
        None => Vec::new(),
    };
    let now = resolve_as_of(as_of)?;
    let report = SpendingAnalyzer::new().analyze(&transactions, &budgets, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!(
        "Spending report as of {} ({} transactions)",
        now, report.meta.count
    );

    print_patterns(&report.recurring);
    if !budgets.is_empty() {
        print_predictions(&report.predictions);
        print_alerts(&report.alerts);
    }
    print_insights(&report.insights);

    Ok(())
}
