//! Budget projection and alert derivation
//!
//! Month-end projections use plain linear extrapolation: the spend rate so
//! far is treated as stationary for the remainder of the month. That is a
//! documented simplification, not a forecasting guarantee.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::AnalyzerConfig;
use crate::models::{
    AlertKind, AlertSeverity, Budget, BudgetAlert, BudgetPrediction, BudgetStatus, Transaction,
};
use crate::preprocess::preprocess;

/// Month-end projection for every budget, sorted worst-first.
///
/// Budgets are evaluated independently: a malformed month key skips that
/// budget with a warning and never aborts the batch.
pub fn calculate_predictions(
    transactions: &[Transaction],
    budgets: &[Budget],
    now: NaiveDate,
) -> Vec<BudgetPrediction> {
    calculate_predictions_with_config(transactions, budgets, now, &AnalyzerConfig::default())
}

pub fn calculate_predictions_with_config(
    transactions: &[Transaction],
    budgets: &[Budget],
    now: NaiveDate,
    config: &AnalyzerConfig,
) -> Vec<BudgetPrediction> {
    let mut predictions: Vec<BudgetPrediction> = budgets
        .iter()
        .filter_map(|budget| match predict_one(transactions, budget, now, config) {
            Ok(p) => Some(p),
            Err(e) => {
                warn!(category = %budget.category, error = %e, "Skipping budget");
                None
            }
        })
        .collect();

    // Worst-first: exceeded < danger < warning < safe. Stable sort keeps
    // insertion order within a status.
    predictions.sort_by_key(|p| p.status.rank());
    predictions
}

fn predict_one(
    transactions: &[Transaction],
    budget: &Budget,
    now: NaiveDate,
    config: &AnalyzerConfig,
) -> crate::error::Result<BudgetPrediction> {
    let (first, last) = budget.month_bounds()?;
    let days_in_month = (last - first).num_days() + 1;

    let current_spent: f64 = transactions
        .iter()
        .filter(|t| t.category() == budget.category && t.date >= first && t.date <= last)
        .map(|t| t.amount)
        .sum();

    let days_passed = if now < first {
        0
    } else if now > last {
        days_in_month
    } else {
        (now - first).num_days() + 1
    };
    let days_remaining = days_in_month - days_passed;

    let daily_average = if days_passed > 0 {
        current_spent / days_passed as f64
    } else {
        0.0
    };
    let predicted_spent = daily_average * days_in_month as f64;
    let predicted_overage = (predicted_spent - budget.amount).max(0.0);

    let percentage_used = if budget.amount > 0.0 {
        current_spent / budget.amount * 100.0
    } else {
        0.0
    };

    // Negative when already over budget: that is a meaningful signal,
    // deliberately not clamped.
    let recommended_daily_limit = if days_remaining > 0 {
        (budget.amount - current_spent) / days_remaining as f64
    } else {
        0.0
    };

    let status = if current_spent >= budget.amount {
        BudgetStatus::Exceeded
    } else if predicted_spent >= budget.amount {
        BudgetStatus::Danger
    } else if percentage_used >= config.budget_warning_percent {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Safe
    };

    let message = match status {
        BudgetStatus::Exceeded => format!(
            "{} budget exceeded: {:.0} spent of {:.0}",
            budget.category, current_spent, budget.amount
        ),
        BudgetStatus::Danger => format!(
            "{} is on pace to reach {:.0}, over the {:.0} budget",
            budget.category, predicted_spent, budget.amount
        ),
        BudgetStatus::Warning => format!(
            "{:.0}% of the {} budget used with {} days left",
            percentage_used, budget.category, days_remaining
        ),
        BudgetStatus::Safe => format!(
            "{} is on track: {:.0}% used",
            budget.category, percentage_used
        ),
    };

    debug!(
        category = %budget.category,
        status = %status,
        current_spent,
        predicted_spent,
        "Budget evaluated"
    );

    Ok(BudgetPrediction {
        category: budget.category.clone(),
        current_spent,
        predicted_spent,
        predicted_overage,
        percentage_used,
        days_remaining,
        daily_average,
        recommended_daily_limit,
        status,
        message,
    })
}

/// Derive alerts from the budget predictions and the raw spending shape.
///
/// Four independent sources, emitted in this order: at-risk predictions,
/// exceeded budgets, category month-over-month surges, and material spend in
/// unbudgeted categories.
pub fn generate_alerts(
    transactions: &[Transaction],
    budgets: &[Budget],
    now: NaiveDate,
) -> Vec<BudgetAlert> {
    generate_alerts_with_config(transactions, budgets, now, &AnalyzerConfig::default())
}

pub fn generate_alerts_with_config(
    transactions: &[Transaction],
    budgets: &[Budget],
    now: NaiveDate,
    config: &AnalyzerConfig,
) -> Vec<BudgetAlert> {
    let predictions = calculate_predictions_with_config(transactions, budgets, now, config);
    let snapshot = preprocess(transactions, now);
    let mut alerts = Vec::new();

    for p in &predictions {
        match p.status {
            BudgetStatus::Danger => alerts.push(BudgetAlert {
                category: p.category.clone(),
                kind: AlertKind::Prediction,
                severity: AlertSeverity::Warning,
                title: format!("{} budget at risk", p.category),
                message: format!(
                    "Projected {:.0} by month end; keep daily spend under {:.0} to stay on budget",
                    p.predicted_spent, p.recommended_daily_limit
                ),
                suggested_amount: Some(p.recommended_daily_limit),
            }),
            BudgetStatus::Exceeded => {
                let suggested = p.current_spent * config.suggested_budget_factor;
                alerts.push(BudgetAlert {
                    category: p.category.clone(),
                    kind: AlertKind::Exceeded,
                    severity: AlertSeverity::Critical,
                    title: format!("{} budget exceeded", p.category),
                    message: format!(
                        "{:.0} spent against the budget; consider raising it to {:.0}",
                        p.current_spent, suggested
                    ),
                    suggested_amount: Some(suggested),
                });
            }
            _ => {}
        }
    }

    // Month-over-month surge, independent of any budget
    let mut surge_categories: Vec<&String> = snapshot.category_totals.this_month.keys().collect();
    surge_categories.sort();
    for category in surge_categories {
        let current = snapshot.category_totals.this_month[category];
        let previous = snapshot
            .category_totals
            .last_month
            .get(category)
            .copied()
            .unwrap_or(0.0);
        if previous > 0.0 && current > previous * config.month_over_month_alert_ratio {
            alerts.push(BudgetAlert {
                category: category.clone(),
                kind: AlertKind::Threshold,
                severity: AlertSeverity::Warning,
                title: format!("{} spending jumped", category),
                message: format!(
                    "{:.0} this month vs {:.0} last month ({:.0}% increase)",
                    current,
                    previous,
                    (current - previous) / previous * 100.0
                ),
                suggested_amount: None,
            });
        }
    }

    // Material spend with no budget covering the current month
    let budgeted: Vec<&str> = budgets
        .iter()
        .filter(|b| {
            b.month_bounds()
                .map(|(first, last)| now >= first && now <= last)
                .unwrap_or(false)
        })
        .map(|b| b.category.as_str())
        .collect();

    let mut unbudgeted: Vec<&String> = snapshot.category_totals.this_month.keys().collect();
    unbudgeted.sort();
    for category in unbudgeted {
        if budgeted.contains(&category.as_str()) {
            continue;
        }
        let spend = snapshot.category_totals.this_month[category];
        if spend > config.unbudgeted_materiality {
            let suggested = spend * config.suggested_budget_factor;
            alerts.push(BudgetAlert {
                category: category.clone(),
                kind: AlertKind::Recommendation,
                severity: AlertSeverity::Info,
                title: format!("Consider a {} budget", category),
                message: format!(
                    "{:.0} spent on {} this month with no budget set; a budget of {:.0} would cover it",
                    spend, category, suggested
                ),
                suggested_amount: Some(suggested),
            });
        }
    }

    alerts
}
