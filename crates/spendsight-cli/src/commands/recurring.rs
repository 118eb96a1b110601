//! Recurring payment command

use std::path::Path;

use anyhow::Result;
use spendsight_core::{RecurringPattern, SpendingAnalyzer};

use super::input::{load_transactions, resolve_as_of};
use super::truncate;

pub fn cmd_recurring(file: &Path, as_of: Option<&str>, json: bool) -> Result<()> {
    let transactions = load_transactions(file)?;
    let now = resolve_as_of(as_of)?;
    let patterns = SpendingAnalyzer::new().detect_recurring_expenses(&transactions, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&patterns)?);
        return Ok(());
    }

    print_patterns(&patterns);
    Ok(())
}

pub fn print_patterns(patterns: &[RecurringPattern]) {
    if patterns.is_empty() {
        println!("No recurring payments detected.");
        println!("Detection needs at least 4 charges from the same merchant.");
        return;
    }

    println!();
    println!("🔁 Recurring Payments");
    println!("   ─────────────────────────────────────────────────────────────");

    for pattern in patterns {
        let missed = if pattern.missed_payment { " ⚠️ overdue" } else { "" };
        println!(
            "   {:24} │ {:>12.0}/{:<9} │ {:>3.0}% │ next {}{}",
            truncate(&pattern.merchant, 24),
            pattern.average_amount,
            pattern.frequency.as_str(),
            pattern.confidence,
            pattern.next_expected_date,
            missed
        );
    }

    let yearly: f64 = patterns.iter().map(|p| p.total_spent_this_year).sum();
    println!();
    println!("   {} recurring merchants, {:.0} spent this year", patterns.len(), yearly);
}
