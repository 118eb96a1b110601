//! Top-category concentration

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::preprocess::Snapshot;

use super::engine::Detector;
use super::types::{Insight, InsightKind};

/// Emits a tip when a single category accounts for more than the
/// concentration threshold of last-30-days spend.
pub struct TopCategoryDetector;

/// Fixed per-category suggestions for the concentration tip.
fn suggestion_for(category: &str) -> &'static str {
    match category {
        "Food" => "Meal planning and batch cooking usually cut food spend fastest",
        "Dining" => "Swapping a few restaurant meals for home cooking adds up quickly",
        "Entertainment" => "Check for overlapping subscriptions or unused memberships",
        "Shopping" => "A 24-hour rule on non-essential purchases curbs impulse buys",
        "Transport" => "Compare ride-hailing against a monthly transit pass",
        "Coffee" => "Brewing at home a few days a week is an easy win",
        _ => "Reviewing the biggest transactions in this category is a good place to start",
    }
}

impl Detector for TopCategoryDetector {
    fn id(&self) -> &'static str {
        "top_category"
    }

    fn name(&self) -> &'static str {
        "Top Category"
    }

    fn detect(&self, snapshot: &Snapshot, config: &AnalyzerConfig) -> Result<Vec<Insight>> {
        let total = snapshot.totals.last_30_days;
        if total <= 0.0 {
            return Ok(vec![]);
        }

        // Deterministic winner: ties resolve to the lexicographically first
        let mut categories: Vec<&String> = snapshot.category_totals.last_30_days.keys().collect();
        categories.sort();
        let mut top: Option<(&String, f64)> = None;
        for category in categories {
            let spend = snapshot.category_totals.last_30_days[category];
            if top.map_or(true, |(_, best)| spend > best) {
                top = Some((category, spend));
            }
        }

        let Some((category, spend)) = top else {
            return Ok(vec![]);
        };
        let category = category.clone();
        let share = spend / total * 100.0;
        if share <= config.concentration_percent {
            return Ok(vec![]);
        }

        Ok(vec![Insight::new(
            InsightKind::Tip,
            format!("{} dominates your spending", category),
            format!(
                "{} is {:.0}% of the last 30 days ({:.0}). {}",
                category,
                share,
                spend,
                suggestion_for(&category)
            ),
        )
        .with_category(category)
        .with_value(spend)
        .with_change(share)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;
    use crate::preprocess::preprocess;
    use chrono::NaiveDate;

    fn tx(date: &str, category: &str, amount: f64) -> Transaction {
        Transaction::new(
            date.parse().unwrap(),
            "Shop",
            Some(category.to_string()),
            amount,
        )
    }

    fn now() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 20).unwrap()
    }

    #[test]
    fn test_concentration_tip() {
        let txs = vec![
            tx("2026-08-05", "Food", 3_000_000.0),
            tx("2026-08-10", "Transport", 1_000_000.0),
            tx("2026-08-12", "Fun", 500_000.0),
        ];
        let snapshot = preprocess(&txs, now());
        let insights = TopCategoryDetector
            .detect(&snapshot, &AnalyzerConfig::default())
            .unwrap();

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Tip);
        assert_eq!(insights[0].category.as_deref(), Some("Food"));
        // 3M of 4.5M ≈ 67%
        assert!(insights[0].change.unwrap() > 40.0);
        assert!(insights[0].description.contains("Meal planning"));
    }

    #[test]
    fn test_unmapped_category_gets_generic_suggestion() {
        let txs = vec![tx("2026-08-05", "Falconry", 3_000_000.0)];
        let snapshot = preprocess(&txs, now());
        let insights = TopCategoryDetector
            .detect(&snapshot, &AnalyzerConfig::default())
            .unwrap();
        assert_eq!(insights.len(), 1);
        assert!(insights[0].description.contains("biggest transactions"));
    }

    #[test]
    fn test_balanced_categories_are_quiet() {
        let txs = vec![
            tx("2026-08-05", "Food", 1_000_000.0),
            tx("2026-08-10", "Transport", 1_000_000.0),
            tx("2026-08-12", "Fun", 1_000_000.0),
        ];
        let snapshot = preprocess(&txs, now());
        assert!(TopCategoryDetector
            .detect(&snapshot, &AnalyzerConfig::default())
            .unwrap()
            .is_empty());
    }
}
