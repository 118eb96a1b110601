//! Analysis configuration
//!
//! All thresholds the detectors use, with the production defaults. Amount
//! thresholds are in minor currency units, matching the transaction data.

/// Tunable thresholds for the analytics engine.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Minimum transactions a merchant cluster needs to be considered
    pub min_transactions: usize,
    /// Minimum confidence (0-100) for a recurring pattern to be emitted
    pub min_confidence: f64,
    /// Normalized-name similarity required to join an existing cluster
    pub similarity_threshold: f64,
    /// Confidence gap treated as a tie when ranking recurring patterns
    pub confidence_tie_margin: f64,

    /// Percentage-used level that flags a budget as `warning`
    pub budget_warning_percent: f64,
    /// This-month/last-month category ratio that triggers a threshold alert
    pub month_over_month_alert_ratio: f64,
    /// Minimum unbudgeted monthly spend before recommending a new budget
    pub unbudgeted_materiality: f64,
    /// Multiplier applied to current spend when suggesting a budget amount
    pub suggested_budget_factor: f64,

    /// Month-over-month category change (percent) worth flagging as a trend
    pub trend_threshold_percent: f64,
    /// Minimum this-month spend for a brand-new category to be flagged
    pub new_category_min_spend: f64,
    /// Weekend/weekday per-observation average difference (percent) to flag
    pub weekend_skew_percent: f64,
    /// Share of last-30-days spend at which one category dominates
    pub concentration_percent: f64,
    /// Daily totals required before spike detection runs
    pub min_days_for_spike: usize,
    /// Peak day vs 30-day daily average multiplier that counts as a spike
    pub spike_multiplier: f64,
    /// Week-over-week change (percent) that counts as a velocity shift
    pub velocity_threshold_percent: f64,
    /// Consecutive zero-spend days before a streak is reported
    pub min_streak_days: usize,
    /// Amount vs overall average multiplier that marks a transaction unusual
    pub outlier_multiplier: f64,
    /// Maximum unusual transactions reported per analysis
    pub outlier_limit: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_transactions: 4,
            min_confidence: 65.0,
            similarity_threshold: 0.8,
            confidence_tie_margin: 10.0,

            budget_warning_percent: 80.0,
            month_over_month_alert_ratio: 1.4,
            unbudgeted_materiality: 500_000.0,
            suggested_budget_factor: 1.2,

            trend_threshold_percent: 25.0,
            new_category_min_spend: 100_000.0,
            weekend_skew_percent: 30.0,
            concentration_percent: 40.0,
            min_days_for_spike: 7,
            spike_multiplier: 2.5,
            velocity_threshold_percent: 30.0,
            min_streak_days: 7,
            outlier_multiplier: 2.0,
            outlier_limit: 3,
        }
    }
}
