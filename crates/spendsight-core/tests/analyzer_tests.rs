//! Integration tests for spendsight-core
//!
//! These tests exercise the full preprocess → detect → predict → insight
//! workflow through the public API.

use chrono::NaiveDate;
use spendsight_core::{
    AlertKind, AnalyzerConfig, Budget, BudgetStatus, Frequency, SpendingAnalyzer, Transaction,
};

fn tx(date: &str, merchant: &str, category: &str, amount: f64) -> Transaction {
    Transaction::new(
        date.parse().unwrap(),
        merchant,
        Some(category.to_string()),
        amount,
    )
}

fn budget(category: &str, amount: f64, month: &str) -> Budget {
    Budget {
        category: category.to_string(),
        amount,
        month: month.to_string(),
    }
}

/// A few months of plausible history as of 2026-08-20:
/// two clean subscriptions, steady groceries, and one big one-off.
fn fixture() -> Vec<Transaction> {
    let mut txs = vec![
        // Netflix, monthly on the 1st, with name variation
        tx("2026-05-01", "NETFLIX.COM", "Entertainment", 260_000.0),
        tx("2026-06-01", "Netflix com", "Entertainment", 260_000.0),
        tx("2026-07-01", "NETFLX COM", "Entertainment", 260_000.0),
        tx("2026-08-01", "netflix.com", "Entertainment", 260_000.0),
        // Spotify, monthly on the 3rd
        tx("2026-05-03", "Spotify AB", "Entertainment", 59_000.0),
        tx("2026-06-03", "Spotify AB", "Entertainment", 59_000.0),
        tx("2026-07-03", "Spotify AB", "Entertainment", 59_000.0),
        tx("2026-08-03", "Spotify AB", "Entertainment", 59_000.0),
        // Groceries, weekly-ish but variable amounts
        tx("2026-07-26", "Big C Market", "Food", 450_000.0),
        tx("2026-08-02", "Big C Market", "Food", 380_000.0),
        tx("2026-08-09", "Big C Market", "Food", 520_000.0),
        tx("2026-08-16", "Big C Market", "Food", 410_000.0),
        // One-off big purchase
        tx("2026-08-11", "Laptop Store", "Electronics", 18_000_000.0),
    ];
    txs.sort_by_key(|t| t.date);
    txs
}

fn now() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 20).unwrap()
}

#[test]
fn full_analysis_workflow() {
    let analyzer = SpendingAnalyzer::new();
    let budgets = vec![
        budget("Food", 2_000_000.0, "2026-08"),
        budget("Entertainment", 400_000.0, "2026-08"),
    ];

    let report = analyzer.analyze(&fixture(), &budgets, now());

    // Both subscriptions detected despite merchant-name noise, plus the
    // weekly grocery habit
    let find = |name: &str| {
        report
            .recurring
            .iter()
            .find(|p| p.merchant.contains(name))
            .unwrap_or_else(|| panic!("no pattern for {}", name))
    };
    assert_eq!(find("NETFLIX").frequency, Frequency::Monthly);
    assert_eq!(find("Spotify").frequency, Frequency::Monthly);
    assert_eq!(find("Big C").frequency, Frequency::Weekly);
    for p in &report.recurring {
        assert!(p.confidence >= 65.0 && p.confidence <= 100.0);
    }

    // Predictions sorted worst-first
    let ranks: Vec<u8> = report.predictions.iter().map(|p| p.status.rank()).collect();
    let mut sorted = ranks.clone();
    sorted.sort();
    assert_eq!(ranks, sorted);

    // The battery ran; the laptop purchase shows up as an unusual charge
    assert!(report
        .insights
        .iter()
        .any(|i| i.title.contains("Laptop Store")));

    assert_eq!(report.meta.count, 13);
}

#[test]
fn recurring_detection_ignores_sparse_merchants() {
    let analyzer = SpendingAnalyzer::new();
    let txs = vec![
        tx("2026-06-01", "Rare Shop", "Other", 100_000.0),
        tx("2026-07-01", "Rare Shop", "Other", 100_000.0),
        tx("2026-08-01", "Rare Shop", "Other", 100_000.0),
    ];
    assert!(analyzer.detect_recurring_expenses(&txs, now()).is_empty());
}

#[test]
fn exceeded_budget_dominates_and_alerts() {
    let analyzer = SpendingAnalyzer::new();
    let txs = vec![tx("2026-08-05", "Big C Market", "Food", 3_000_000.0)];
    let budgets = vec![budget("Food", 2_000_000.0, "2026-08")];

    let predictions = analyzer.calculate_budget_predictions(&txs, &budgets, now());
    assert_eq!(predictions[0].status, BudgetStatus::Exceeded);

    let alerts = analyzer.generate_budget_alerts(&txs, &budgets, now());
    assert!(alerts.iter().any(|a| a.kind == AlertKind::Exceeded));
}

#[test]
fn category_totals_conserve_mass() {
    let snapshot = SpendingAnalyzer::new().preprocess(&fixture(), now());

    let sum: f64 = snapshot.category_totals.this_month.values().sum();
    assert!((sum - snapshot.totals.this_month).abs() < 1e-6);
    let sum: f64 = snapshot.category_totals.last_month.values().sum();
    assert!((sum - snapshot.totals.last_month).abs() < 1e-6);
    let sum: f64 = snapshot.category_totals.last_30_days.values().sum();
    assert!((sum - snapshot.totals.last_30_days).abs() < 1e-6);
}

#[test]
fn report_round_trips_through_json() {
    let analyzer = SpendingAnalyzer::new();
    let budgets = vec![budget("Food", 2_000_000.0, "2026-08")];
    let report = analyzer.analyze(&fixture(), &budgets, now());

    let json = serde_json::to_string(&report).unwrap();
    let back: spendsight_core::AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.recurring.len(), report.recurring.len());
    assert_eq!(back.meta.cache_key(), report.meta.cache_key());
}

#[test]
fn custom_config_changes_thresholds() {
    let config = AnalyzerConfig {
        min_transactions: 3,
        ..Default::default()
    };
    let analyzer = SpendingAnalyzer::with_config(config);
    let txs = vec![
        tx("2026-06-01", "Rare Shop", "Other", 100_000.0),
        tx("2026-07-01", "Rare Shop", "Other", 100_000.0),
        tx("2026-08-01", "Rare Shop", "Other", 100_000.0),
    ];
    assert_eq!(analyzer.detect_recurring_expenses(&txs, now()).len(), 1);
}
