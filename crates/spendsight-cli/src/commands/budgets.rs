//! Budget prediction and alert commands

use std::path::Path;

use anyhow::Result;
use spendsight_core::{AlertSeverity, BudgetAlert, BudgetPrediction, BudgetStatus, SpendingAnalyzer};

use super::input::{load_budgets, load_transactions, resolve_as_of};

pub fn cmd_budgets(file: &Path, budgets: &Path, as_of: Option<&str>, json: bool) -> Result<()> {
    let transactions = load_transactions(file)?;
    let budgets = load_budgets(budgets)?;
    let now = resolve_as_of(as_of)?;
    let predictions =
        SpendingAnalyzer::new().calculate_budget_predictions(&transactions, &budgets, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&predictions)?);
        return Ok(());
    }

    print_predictions(&predictions);
    Ok(())
}

pub fn cmd_alerts(file: &Path, budgets: &Path, as_of: Option<&str>, json: bool) -> Result<()> {
    let transactions = load_transactions(file)?;
    let budgets = load_budgets(budgets)?;
    let now = resolve_as_of(as_of)?;
    let alerts = SpendingAnalyzer::new().generate_budget_alerts(&transactions, &budgets, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&alerts)?);
        return Ok(());
    }

    print_alerts(&alerts);
    Ok(())
}

pub fn print_predictions(predictions: &[BudgetPrediction]) {
    if predictions.is_empty() {
        println!("No budgets cover the reference month.");
        return;
    }

    println!();
    println!("📊 Budget Projections");
    println!("   ─────────────────────────────────────────────────────────────");

    for p in predictions {
        let icon = match p.status {
            BudgetStatus::Exceeded => "🔴",
            BudgetStatus::Danger => "🟠",
            BudgetStatus::Warning => "🟡",
            BudgetStatus::Safe => "🟢",
        };
        println!(
            "   {} {:16} │ spent {:>12.0} │ projected {:>12.0} │ {:>5.1}%",
            icon, p.category, p.current_spent, p.predicted_spent, p.percentage_used
        );
        println!("      {}", p.message);
    }
}

pub fn print_alerts(alerts: &[BudgetAlert]) {
    if alerts.is_empty() {
        println!("✅ No budget alerts.");
        return;
    }

    println!();
    println!("🚨 Budget Alerts");
    println!("   ─────────────────────────────────────────────────────────────");

    for alert in alerts {
        let icon = match alert.severity {
            AlertSeverity::Critical => "🔴",
            AlertSeverity::Warning => "🟡",
            AlertSeverity::Info => "💡",
        };
        println!("   {} {}", icon, alert.title);
        println!("      {}", alert.message);
        if let Some(amount) = alert.suggested_amount {
            println!("      suggested: {:.0}", amount);
        }
    }
}
