//! Weekend vs weekday spending habits

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::preprocess::Snapshot;

use super::engine::Detector;
use super::types::{Insight, InsightKind};

/// Flags categories whose per-observation average differs sharply between
/// weekends and weekdays over the last 30 days. Both sides need at least one
/// observation; otherwise there is nothing to compare.
pub struct WeekendSkewDetector;

impl Detector for WeekendSkewDetector {
    fn id(&self) -> &'static str {
        "weekend_skew"
    }

    fn name(&self) -> &'static str {
        "Weekend Skew"
    }

    fn detect(&self, snapshot: &Snapshot, config: &AnalyzerConfig) -> Result<Vec<Insight>> {
        let mut categories: Vec<&String> = snapshot.weekend_split.keys().collect();
        categories.sort();

        let mut insights = Vec::new();
        for category in categories {
            let split = &snapshot.weekend_split[category];
            if split.weekend_count == 0 || split.weekday_count == 0 {
                continue;
            }

            let weekend_avg = split.weekend_total / split.weekend_count as f64;
            let weekday_avg = split.weekday_total / split.weekday_count as f64;
            if weekday_avg == 0.0 {
                continue;
            }

            let change = (weekend_avg - weekday_avg) / weekday_avg * 100.0;
            if change.abs() <= config.weekend_skew_percent {
                continue;
            }

            let (side, other) = if change > 0.0 {
                ("weekends", "weekdays")
            } else {
                ("weekdays", "weekends")
            };
            insights.push(
                Insight::new(
                    InsightKind::Pattern,
                    format!("{} spending leans toward {}", category, side),
                    format!(
                        "Average {} purchase on {} is {:.0} vs {:.0} on {}",
                        category,
                        side,
                        weekend_avg.max(weekday_avg),
                        weekend_avg.min(weekday_avg),
                        other
                    ),
                )
                .with_category(category.clone())
                .with_change(change),
            );
        }

        Ok(insights)
    }
}
