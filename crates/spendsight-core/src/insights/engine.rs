//! Insight engine: runs a fixed battery of independent detectors
//!
//! Each detector is a pure function over the preprocessed snapshot. The
//! engine concatenates detector outputs in registration order; it does not
//! re-rank globally by severity. A failing detector is logged and skipped so
//! it never suppresses the others.

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::preprocess::Snapshot;

use super::concentration::TopCategoryDetector;
use super::outlier::UnusualTransactionDetector;
use super::spike::{SpendingSpikeDetector, SpendingVelocityDetector};
use super::streak::NoSpendStreakDetector;
use super::trend::{CategoryTrendDetector, NewCategoryDetector};
use super::types::Insight;
use super::weekend::WeekendSkewDetector;

/// A single insight detector over the preprocessed snapshot.
pub trait Detector: Send + Sync {
    /// Stable identifier, used in logs.
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// Inspect the snapshot and produce zero or more insights.
    fn detect(&self, snapshot: &Snapshot, config: &AnalyzerConfig) -> Result<Vec<Insight>>;
}

/// Runs the registered detectors in order.
pub struct InsightEngine {
    detectors: Vec<Box<dyn Detector>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Engine with the built-in battery in its canonical order.
    pub fn new() -> Self {
        let mut engine = Self { detectors: vec![] };

        engine.register(Box::new(CategoryTrendDetector));
        engine.register(Box::new(NewCategoryDetector));
        engine.register(Box::new(WeekendSkewDetector));
        engine.register(Box::new(TopCategoryDetector));
        engine.register(Box::new(SpendingSpikeDetector));
        engine.register(Box::new(SpendingVelocityDetector));
        engine.register(Box::new(NoSpendStreakDetector));
        engine.register(Box::new(UnusualTransactionDetector));

        engine
    }

    pub fn register(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    /// Run every detector, concatenating outputs in registration order.
    pub fn run(&self, snapshot: &Snapshot, config: &AnalyzerConfig) -> Vec<Insight> {
        let mut all = Vec::new();

        for detector in &self.detectors {
            match detector.detect(snapshot, config) {
                Ok(insights) => {
                    tracing::debug!(
                        detector = detector.id(),
                        count = insights.len(),
                        "Detector complete"
                    );
                    all.extend(insights);
                }
                Err(e) => {
                    tracing::warn!(
                        detector = detector.id(),
                        error = %e,
                        "Detector failed, continuing with the rest"
                    );
                }
            }
        }

        all
    }

    pub fn detector_ids(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.id()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::preprocess;
    use chrono::NaiveDate;

    #[test]
    fn test_battery_registration_order() {
        let engine = InsightEngine::new();
        assert_eq!(
            engine.detector_ids(),
            vec![
                "category_trend",
                "new_category",
                "weekend_skew",
                "top_category",
                "spending_spike",
                "spending_velocity",
                "no_spend_streak",
                "unusual_transaction",
            ]
        );
    }

    #[test]
    fn test_empty_snapshot_yields_no_insights() {
        let now = NaiveDate::from_ymd_opt(2026, 8, 20).unwrap();
        let snapshot = preprocess(&[], now);
        let engine = InsightEngine::new();
        let insights = engine.run(&snapshot, &AnalyzerConfig::default());
        assert!(insights.is_empty());
    }
}
