//! Analysis facade
//!
//! One entry point over the whole engine. Every method is synchronous and
//! pure: the caller injects the transaction log, the budgets, and the
//! reference date, and gets plain serializable records back. Calling any
//! method twice with identical inputs yields identical output, so external
//! time-boxed caching keyed by `SnapshotMeta::cache_key` is safe.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::budget::{calculate_predictions_with_config, generate_alerts_with_config};
use crate::config::AnalyzerConfig;
use crate::insights::{Insight, InsightEngine};
use crate::models::{Budget, BudgetAlert, BudgetPrediction, RecurringPattern, Transaction};
use crate::preprocess::{preprocess, Snapshot, SnapshotMeta};
use crate::recurring::detect_recurring;

/// Everything one analysis pass produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub recurring: Vec<RecurringPattern>,
    pub predictions: Vec<BudgetPrediction>,
    pub alerts: Vec<BudgetAlert>,
    pub insights: Vec<Insight>,
    pub meta: SnapshotMeta,
}

/// The spending-analytics engine.
pub struct SpendingAnalyzer {
    config: AnalyzerConfig,
    engine: InsightEngine,
}

impl Default for SpendingAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpendingAnalyzer {
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            config,
            engine: InsightEngine::new(),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Build the preprocessed snapshot for `transactions` as of `now`.
    pub fn preprocess(&self, transactions: &[Transaction], now: NaiveDate) -> Snapshot {
        preprocess(transactions, now)
    }

    /// Detect recurring-payment patterns, ranked by confidence.
    ///
    /// Transactions should be chronologically ascending; merchant grouping
    /// is first-match and order-sensitive.
    pub fn detect_recurring_expenses(
        &self,
        transactions: &[Transaction],
        now: NaiveDate,
    ) -> Vec<RecurringPattern> {
        detect_recurring(transactions, now, &self.config)
    }

    /// Month-end projection per budget, sorted worst-first.
    pub fn calculate_budget_predictions(
        &self,
        transactions: &[Transaction],
        budgets: &[Budget],
        now: NaiveDate,
    ) -> Vec<BudgetPrediction> {
        calculate_predictions_with_config(transactions, budgets, now, &self.config)
    }

    /// Derive budget alerts from predictions and spending shape.
    pub fn generate_budget_alerts(
        &self,
        transactions: &[Transaction],
        budgets: &[Budget],
        now: NaiveDate,
    ) -> Vec<BudgetAlert> {
        generate_alerts_with_config(transactions, budgets, now, &self.config)
    }

    /// Run the insight battery over a fresh snapshot.
    pub fn generate_insights(&self, transactions: &[Transaction], now: NaiveDate) -> Vec<Insight> {
        let snapshot = preprocess(transactions, now);
        self.insights_from_snapshot(&snapshot)
    }

    /// Run the insight battery over an already-built snapshot.
    pub fn insights_from_snapshot(&self, snapshot: &Snapshot) -> Vec<Insight> {
        self.engine.run(snapshot, &self.config)
    }

    /// Run everything and bundle the results.
    pub fn analyze(
        &self,
        transactions: &[Transaction],
        budgets: &[Budget],
        now: NaiveDate,
    ) -> AnalysisReport {
        let snapshot = preprocess(transactions, now);
        let report = AnalysisReport {
            recurring: self.detect_recurring_expenses(transactions, now),
            predictions: self.calculate_budget_predictions(transactions, budgets, now),
            alerts: self.generate_budget_alerts(transactions, budgets, now),
            insights: self.insights_from_snapshot(&snapshot),
            meta: snapshot.meta,
        };

        info!(
            transactions = transactions.len(),
            budgets = budgets.len(),
            recurring = report.recurring.len(),
            alerts = report.alerts.len(),
            insights = report.insights.len(),
            "Analysis complete"
        );

        report
    }
}
