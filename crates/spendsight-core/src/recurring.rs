//! Recurring-payment pattern detection
//!
//! Consumes merchant clusters and scores each on three axes: how regular the
//! gaps between charges are, how regular the amounts are, and how recently
//! the merchant last charged. Clusters scoring at or above the confidence
//! floor become `RecurringPattern` records with a calendar-aligned projection
//! of the next charge.

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use crate::config::AnalyzerConfig;
use crate::merchants::{group_transactions, MerchantCluster};
use crate::models::{Frequency, RecurringPattern, Transaction};
use crate::stats::{consistency_score, mean};

/// Weights of the three confidence components.
const INTERVAL_WEIGHT: f64 = 0.5;
const AMOUNT_WEIGHT: f64 = 0.3;
const RECENCY_WEIGHT: f64 = 0.2;

/// Detect recurring-payment patterns across the whole transaction log.
///
/// Transactions should be supplied in chronological order; grouping is
/// first-match and therefore order-sensitive.
pub fn detect_recurring(
    transactions: &[Transaction],
    now: NaiveDate,
    config: &AnalyzerConfig,
) -> Vec<RecurringPattern> {
    let clusters = group_transactions(
        transactions,
        config.similarity_threshold,
        config.min_transactions,
    );

    let mut patterns: Vec<RecurringPattern> = clusters
        .iter()
        .filter_map(|cluster| pattern_from_cluster(cluster, now, config))
        .collect();

    rank_patterns(&mut patterns, config.confidence_tie_margin);

    info!(
        clusters = clusters.len(),
        patterns = patterns.len(),
        "Recurring-pattern detection complete"
    );

    patterns
}

/// Score one retained cluster; `None` when it does not look recurring.
pub fn pattern_from_cluster(
    cluster: &MerchantCluster,
    now: NaiveDate,
    config: &AnalyzerConfig,
) -> Option<RecurringPattern> {
    let mut members = cluster.transactions.clone();
    members.sort_by_key(|t| t.date);

    let intervals: Vec<f64> = members
        .windows(2)
        .map(|w| (w[1].date - w[0].date).num_days() as f64)
        .collect();
    if intervals.is_empty() {
        return None;
    }

    let avg_interval = weighted_average_interval(&intervals);
    let interval_consistency = consistency_score(&intervals);

    let amounts: Vec<f64> = members.iter().map(|t| t.amount).collect();
    let amount_consistency = consistency_score(&amounts);

    let last_date = members.last().expect("non-empty cluster").date;
    let days_since_last = (now - last_date).num_days() as f64;
    let recency = recency_factor(avg_interval, days_since_last);

    let confidence = (interval_consistency * INTERVAL_WEIGHT
        + amount_consistency * AMOUNT_WEIGHT
        + recency * RECENCY_WEIGHT)
        .round()
        .clamp(0.0, 100.0);

    if confidence < config.min_confidence {
        debug!(
            merchant = %cluster.representative_name,
            confidence,
            "Cluster below confidence floor, skipping"
        );
        return None;
    }

    let frequency = Frequency::from_interval_days(avg_interval);
    let next_expected_date = frequency.advance(last_date);
    let missed_payment = (now - next_expected_date).num_days() > frequency.grace_days();

    let total_spent_this_year = members
        .iter()
        .filter(|t| t.date.year() == now.year())
        .map(|t| t.amount)
        .sum();

    debug!(
        merchant = %cluster.representative_name,
        frequency = %frequency,
        confidence,
        missed_payment,
        "Recurring pattern detected"
    );

    Some(RecurringPattern {
        merchant: cluster.representative_name.clone(),
        category: cluster.category.clone(),
        average_amount: mean(&amounts),
        frequency,
        interval_days: avg_interval.round() as i64,
        last_date,
        next_expected_date,
        confidence,
        transactions: members,
        total_spent_this_year,
        missed_payment,
    })
}

/// Recency-weighted average gap: the last `min(3, len)` gaps count for 60%,
/// the rest for 40%. With no older gaps the recent average stands alone.
fn weighted_average_interval(intervals: &[f64]) -> f64 {
    let recent_n = intervals.len().min(3);
    let split = intervals.len() - recent_n;
    let recent_avg = mean(&intervals[split..]);
    let older_avg = if split == 0 {
        recent_avg
    } else {
        mean(&intervals[..split])
    };
    recent_avg * 0.6 + older_avg * 0.4
}

/// 100 while the merchant is within twice its average interval of the last
/// charge, then decaying by 20 points per average interval, floored at 20.
fn recency_factor(avg_interval: f64, days_since_last: f64) -> f64 {
    let expected_gap = avg_interval * 2.0;
    if days_since_last <= expected_gap {
        return 100.0;
    }
    if avg_interval <= 0.0 {
        return 20.0;
    }
    (100.0 - (days_since_last - expected_gap) / avg_interval * 20.0).max(20.0)
}

/// Sort by confidence descending; confidences within `tie_margin` points of
/// each other fall back to total-spent-this-year descending.
///
/// Two passes keep the primary order intact: a plain confidence sort, then a
/// spend re-sort inside each run of patterns within the margin of the run's
/// highest score. Runs are anchored, not chained, so a pattern can never
/// climb past one scoring more than the margin above it.
fn rank_patterns(patterns: &mut [RecurringPattern], tie_margin: f64) {
    patterns.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });

    let mut start = 0;
    while start < patterns.len() {
        let anchor = patterns[start].confidence;
        let mut end = start + 1;
        while end < patterns.len() && anchor - patterns[end].confidence <= tie_margin {
            end += 1;
        }
        patterns[start..end].sort_by(|a, b| {
            b.total_spent_this_year
                .partial_cmp(&a.total_spent_this_year)
                .unwrap_or(Ordering::Equal)
        });
        start = end;
    }
}
