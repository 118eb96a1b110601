//! Insight battery command

use std::path::Path;

use anyhow::Result;
use spendsight_core::{Insight, InsightKind, SpendingAnalyzer};

use super::input::{load_transactions, resolve_as_of};

pub fn cmd_insights(file: &Path, as_of: Option<&str>, json: bool) -> Result<()> {
    let transactions = load_transactions(file)?;
    let now = resolve_as_of(as_of)?;
    let insights = SpendingAnalyzer::new().generate_insights(&transactions, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    print_insights(&insights);
    Ok(())
}

pub fn print_insights(insights: &[Insight]) {
    if insights.is_empty() {
        println!("No insights this time. More history sharpens the picture.");
        return;
    }

    println!();
    println!("💡 Spending Insights");
    println!("   ─────────────────────────────────────────────────────────────");

    for insight in insights {
        let icon = match insight.kind {
            InsightKind::Trend => "📈",
            InsightKind::Pattern => "🔍",
            InsightKind::Alert => "🚨",
            InsightKind::Tip => "💡",
        };
        println!("   {} {}", icon, insight.title);
        println!("      {}", insight.description);
    }
}
