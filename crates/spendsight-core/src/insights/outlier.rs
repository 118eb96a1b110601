//! Unusually large single transactions

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::models::Transaction;
use crate::preprocess::Snapshot;

use super::engine::Detector;
use super::types::{Insight, InsightKind};

/// Flags the largest transactions that exceed the outlier multiple of the
/// overall average amount, capped at the configured limit.
pub struct UnusualTransactionDetector;

impl Detector for UnusualTransactionDetector {
    fn id(&self) -> &'static str {
        "unusual_transaction"
    }

    fn name(&self) -> &'static str {
        "Unusual Transaction"
    }

    fn detect(&self, snapshot: &Snapshot, config: &AnalyzerConfig) -> Result<Vec<Insight>> {
        let average = snapshot.overall_average();
        if average <= 0.0 {
            return Ok(vec![]);
        }

        let threshold = average * config.outlier_multiplier;
        let mut outliers: Vec<&Transaction> = snapshot
            .merchants
            .values()
            .flat_map(|agg| agg.transactions.iter())
            .filter(|t| t.amount > threshold)
            .collect();

        // Largest first; date then merchant keep ties deterministic
        outliers.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.date.cmp(&b.date))
                .then_with(|| a.merchant.cmp(&b.merchant))
        });
        outliers.truncate(config.outlier_limit);

        Ok(outliers
            .into_iter()
            .map(|t| {
                Insight::new(
                    InsightKind::Alert,
                    format!("Unusually large charge at {}", t.merchant),
                    format!(
                        "{:.0} at {} on {}, {:.1}x your {:.0} average",
                        t.amount,
                        t.merchant,
                        t.date,
                        t.amount / average,
                        average
                    ),
                )
                .with_category(t.category().to_string())
                .with_value(t.amount)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::preprocess;
    use chrono::NaiveDate;

    fn tx(date: &str, merchant: &str, amount: f64) -> Transaction {
        Transaction::new(date.parse().unwrap(), merchant, None, amount)
    }

    fn now() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 20).unwrap()
    }

    #[test]
    fn test_outliers_capped_at_three() {
        // Average pulled low by many small charges
        let mut txs: Vec<Transaction> = (1..=16)
            .map(|i| tx("2026-08-01", &format!("Shop {}", i), 50_000.0))
            .collect();
        txs.push(tx("2026-08-05", "Laptop Store", 8_000_000.0));
        txs.push(tx("2026-08-06", "Dentist", 4_000_000.0));
        txs.push(tx("2026-08-07", "Mechanic", 3_000_000.0));
        txs.push(tx("2026-08-08", "Vet", 2_000_000.0));

        let snapshot = preprocess(&txs, now());
        let insights = UnusualTransactionDetector
            .detect(&snapshot, &AnalyzerConfig::default())
            .unwrap();

        assert_eq!(insights.len(), 3);
        assert_eq!(insights[0].value, Some(8_000_000.0));
        assert!(insights[0].title.contains("Laptop Store"));
        assert_eq!(insights[1].value, Some(4_000_000.0));
        assert_eq!(insights[2].value, Some(3_000_000.0));
    }

    #[test]
    fn test_uniform_amounts_have_no_outliers() {
        let txs: Vec<Transaction> = (1..=10)
            .map(|i| tx("2026-08-01", &format!("Shop {}", i), 100_000.0))
            .collect();
        let snapshot = preprocess(&txs, now());
        assert!(UnusualTransactionDetector
            .detect(&snapshot, &AnalyzerConfig::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_empty_input() {
        let snapshot = preprocess(&[], now());
        assert!(UnusualTransactionDetector
            .detect(&snapshot, &AnalyzerConfig::default())
            .unwrap()
            .is_empty());
    }
}
