//! No-spend streaks

use chrono::Duration;

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::preprocess::Snapshot;

use super::engine::Detector;
use super::types::{Insight, InsightKind};

/// Counts consecutive zero-spend calendar days walking backward from
/// yesterday. Today is excluded as in-progress. The walk stops at the edge
/// of the 30-day window, so a reported streak caps at 30 days. An entirely
/// empty transaction history reports nothing; a streak needs some history
/// to be a streak against.
pub struct NoSpendStreakDetector;

impl Detector for NoSpendStreakDetector {
    fn id(&self) -> &'static str {
        "no_spend_streak"
    }

    fn name(&self) -> &'static str {
        "No-Spend Streak"
    }

    fn detect(&self, snapshot: &Snapshot, config: &AnalyzerConfig) -> Result<Vec<Insight>> {
        if snapshot.meta.count == 0 {
            return Ok(vec![]);
        }

        let mut streak = 0usize;
        let mut day = snapshot.boundaries.now - Duration::days(1);
        while day >= snapshot.boundaries.cutoff_30_days {
            let spent = snapshot.daily_totals.get(&day).copied().unwrap_or(0.0);
            if spent > 0.0 {
                break;
            }
            streak += 1;
            day -= Duration::days(1);
        }

        if streak < config.min_streak_days {
            return Ok(vec![]);
        }

        Ok(vec![Insight::new(
            InsightKind::Tip,
            format!("{}-day no-spend streak", streak),
            format!(
                "No spending recorded for {} consecutive days ending yesterday",
                streak
            ),
        )
        .with_value(streak as f64)])
    }
}
