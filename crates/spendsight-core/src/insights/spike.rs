//! Single-day spikes and week-over-week velocity

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::preprocess::Snapshot;

use super::engine::Detector;
use super::types::{Insight, InsightKind};

/// Flags the peak spending day of the last 30 days when it towers over the
/// daily average. Needs a minimum number of observed days so a near-empty
/// window cannot spike on its only data point.
pub struct SpendingSpikeDetector;

impl Detector for SpendingSpikeDetector {
    fn id(&self) -> &'static str {
        "spending_spike"
    }

    fn name(&self) -> &'static str {
        "Spending Spike"
    }

    fn detect(&self, snapshot: &Snapshot, config: &AnalyzerConfig) -> Result<Vec<Insight>> {
        if snapshot.daily_totals.len() < config.min_days_for_spike {
            return Ok(vec![]);
        }

        let daily_avg = snapshot.average_daily_spend();
        if daily_avg <= 0.0 {
            return Ok(vec![]);
        }

        let Some((day, amount)) = snapshot
            .daily_totals
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        else {
            return Ok(vec![]);
        };

        if *amount <= daily_avg * config.spike_multiplier {
            return Ok(vec![]);
        }

        Ok(vec![Insight::new(
            InsightKind::Alert,
            "Spending spike",
            format!(
                "{:.0} spent on {}, {:.1}x your {:.0} daily average",
                amount,
                day,
                amount / daily_avg,
                daily_avg
            ),
        )
        .with_value(*amount)
        .with_change((amount - daily_avg) / daily_avg * 100.0)])
    }
}

/// Compares the last 7 days against the 7 days before them. Quiet when the
/// prior week had no spend; there is no rate to compare against.
pub struct SpendingVelocityDetector;

impl Detector for SpendingVelocityDetector {
    fn id(&self) -> &'static str {
        "spending_velocity"
    }

    fn name(&self) -> &'static str {
        "Spending Velocity"
    }

    fn detect(&self, snapshot: &Snapshot, config: &AnalyzerConfig) -> Result<Vec<Insight>> {
        let previous = snapshot.totals.previous_7_days;
        if previous <= 0.0 {
            return Ok(vec![]);
        }

        let current = snapshot.totals.last_7_days;
        let change = (current - previous) / previous * 100.0;
        if change.abs() <= config.velocity_threshold_percent {
            return Ok(vec![]);
        }

        let direction = if change > 0.0 { "up" } else { "down" };
        Ok(vec![Insight::new(
            InsightKind::Trend,
            format!("Spending pace {} {:.0}%", direction, change.abs()),
            format!(
                "{:.0} in the last 7 days vs {:.0} in the 7 days before",
                current, previous
            ),
        )
        .with_value(current)
        .with_change(change)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;
    use crate::preprocess::preprocess;
    use chrono::{Duration, NaiveDate};

    fn tx(date: NaiveDate, amount: f64) -> Transaction {
        Transaction::new(date, "Shop", Some("Food".to_string()), amount)
    }

    fn now() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 20).unwrap()
    }

    #[test]
    fn test_spike_detected() {
        // Nine steady days plus one huge day
        let mut txs: Vec<Transaction> = (1..=9)
            .map(|i| tx(now() - Duration::days(i), 100_000.0))
            .collect();
        txs.push(tx(now() - Duration::days(10), 2_000_000.0));

        let snapshot = preprocess(&txs, now());
        let insights = SpendingSpikeDetector
            .detect(&snapshot, &AnalyzerConfig::default())
            .unwrap();

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Alert);
        assert_eq!(insights[0].value, Some(2_000_000.0));
    }

    #[test]
    fn test_spike_needs_enough_days() {
        let txs = vec![
            tx(now() - Duration::days(1), 100_000.0),
            tx(now() - Duration::days(2), 2_000_000.0),
        ];
        let snapshot = preprocess(&txs, now());
        assert!(SpendingSpikeDetector
            .detect(&snapshot, &AnalyzerConfig::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_velocity_up_and_down() {
        // Last 7 days: 1.4M, previous 7 days: 700k -> +100%
        let txs = vec![
            tx(now() - Duration::days(2), 1_400_000.0),
            tx(now() - Duration::days(9), 700_000.0),
        ];
        let snapshot = preprocess(&txs, now());
        let insights = SpendingVelocityDetector
            .detect(&snapshot, &AnalyzerConfig::default())
            .unwrap();
        assert_eq!(insights.len(), 1);
        assert!((insights[0].change.unwrap() - 100.0).abs() < 1e-9);

        // Quiet week after a busy one
        let txs = vec![
            tx(now() - Duration::days(2), 300_000.0),
            tx(now() - Duration::days(9), 700_000.0),
        ];
        let snapshot = preprocess(&txs, now());
        let insights = SpendingVelocityDetector
            .detect(&snapshot, &AnalyzerConfig::default())
            .unwrap();
        assert_eq!(insights.len(), 1);
        assert!(insights[0].change.unwrap() < 0.0);
    }

    #[test]
    fn test_velocity_needs_prior_week() {
        let txs = vec![tx(now() - Duration::days(2), 1_400_000.0)];
        let snapshot = preprocess(&txs, now());
        assert!(SpendingVelocityDetector
            .detect(&snapshot, &AnalyzerConfig::default())
            .unwrap()
            .is_empty());
    }
}
