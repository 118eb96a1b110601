//! Month-over-month category movements

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::preprocess::Snapshot;

use super::engine::Detector;
use super::types::{Insight, InsightKind};

/// Flags categories whose this-month spend moved more than the trend
/// threshold against last month. Categories with zero last-month spend are
/// left to the new-category detector; there is no baseline to compare.
pub struct CategoryTrendDetector;

impl Detector for CategoryTrendDetector {
    fn id(&self) -> &'static str {
        "category_trend"
    }

    fn name(&self) -> &'static str {
        "Category Trend"
    }

    fn detect(&self, snapshot: &Snapshot, config: &AnalyzerConfig) -> Result<Vec<Insight>> {
        let mut categories: Vec<&String> = snapshot.category_totals.this_month.keys().collect();
        categories.sort();

        let mut insights = Vec::new();
        for category in categories {
            let current = snapshot.category_totals.this_month[category];
            let previous = match snapshot.category_totals.last_month.get(category) {
                Some(v) if *v > 0.0 => *v,
                _ => continue,
            };

            let change = (current - previous) / previous * 100.0;
            if change.abs() <= config.trend_threshold_percent {
                continue;
            }

            let direction = if change > 0.0 { "up" } else { "down" };
            insights.push(
                Insight::new(
                    InsightKind::Trend,
                    format!("{} spending {} {:.0}%", category, direction, change.abs()),
                    format!(
                        "{} is at {:.0} this month vs {:.0} last month",
                        category, current, previous
                    ),
                )
                .with_category(category.clone())
                .with_value(current)
                .with_change(change),
            );
        }

        Ok(insights)
    }
}

/// Flags categories that appeared this month with no last-month history and
/// meaningful spend behind them.
pub struct NewCategoryDetector;

impl Detector for NewCategoryDetector {
    fn id(&self) -> &'static str {
        "new_category"
    }

    fn name(&self) -> &'static str {
        "New Category"
    }

    fn detect(&self, snapshot: &Snapshot, config: &AnalyzerConfig) -> Result<Vec<Insight>> {
        let mut categories: Vec<&String> = snapshot.category_totals.this_month.keys().collect();
        categories.sort();

        let mut insights = Vec::new();
        for category in categories {
            let current = snapshot.category_totals.this_month[category];
            let previous = snapshot
                .category_totals
                .last_month
                .get(category)
                .copied()
                .unwrap_or(0.0);

            if previous == 0.0 && current >= config.new_category_min_spend {
                insights.push(
                    Insight::new(
                        InsightKind::Pattern,
                        format!("New spending category: {}", category),
                        format!(
                            "{:.0} spent on {} this month with no history last month",
                            current, category
                        ),
                    )
                    .with_category(category.clone())
                    .with_value(current),
                );
            }
        }

        Ok(insights)
    }
}
