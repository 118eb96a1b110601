//! Domain models for spendsight
//!
//! Inputs (`Transaction`, `Budget`) are externally owned and never mutated.
//! Outputs (`RecurringPattern`, `BudgetPrediction`, `BudgetAlert`) are plain
//! serializable records with no attached behavior.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Category assigned when a transaction carries none.
pub const DEFAULT_CATEGORY: &str = "Other";

/// A spending transaction.
///
/// Amounts are non-negative decimals in a consistent unit across the set
/// (minor currency units). `date` is the sole ordering key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub merchant: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub amount: f64,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        merchant: impl Into<String>,
        category: Option<String>,
        amount: f64,
    ) -> Self {
        Self {
            date,
            merchant: merchant.into(),
            category,
            amount,
        }
    }

    /// Category with the documented default applied.
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// Check the input preconditions the analysis passes assume.
    ///
    /// The engine itself does not re-validate; callers that ingest untrusted
    /// data should filter with this before invoking the core.
    pub fn validate(&self) -> Result<()> {
        if self.merchant.trim().is_empty() {
            return Err(Error::InvalidTransaction(format!(
                "empty merchant on {}",
                self.date
            )));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidTransaction(format!(
                "non-negative finite amount required, got {} for {}",
                self.amount, self.merchant
            )));
        }
        Ok(())
    }
}

/// A spending target for one category in one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    pub amount: f64,
    /// Calendar-month key, e.g. "2026-08".
    pub month: String,
}

impl Budget {
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(Error::InvalidBudget(format!(
                "positive amount required for {}, got {}",
                self.category, self.amount
            )));
        }
        self.month_bounds()?;
        Ok(())
    }

    /// Parse the month key into (first day, last day) of the month.
    pub fn month_bounds(&self) -> Result<(NaiveDate, NaiveDate)> {
        parse_month_key(&self.month)
    }
}

/// Parse a "YYYY-MM" key into (first day, last day) of that month.
pub fn parse_month_key(key: &str) -> Result<(NaiveDate, NaiveDate)> {
    let invalid = || Error::InvalidMonthKey(key.to_string());

    let (year, month) = key.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .ok_or_else(invalid)?;
    Ok((first, last))
}

/// Recurrence class assigned from the average interval between charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
        }
    }

    /// Classify an average gap (in days) into a recurrence bucket.
    pub fn from_interval_days(avg_interval: f64) -> Self {
        if avg_interval <= 9.0 {
            Self::Weekly
        } else if avg_interval <= 16.0 {
            Self::Biweekly
        } else if avg_interval <= 35.0 {
            Self::Monthly
        } else {
            Self::Quarterly
        }
    }

    /// Days past the expected date before a charge counts as missed.
    pub fn grace_days(&self) -> i64 {
        match self {
            Self::Weekly => 3,
            Self::Biweekly => 5,
            Self::Monthly | Self::Quarterly => 7,
        }
    }

    /// Advance a date by one canonical period.
    ///
    /// Weekly/biweekly advance by whole days; monthly/quarterly advance by
    /// calendar months preserving the day-of-month (clamped at month end),
    /// so projections land on sensible calendar dates rather than
    /// last-date-plus-average-interval.
    pub fn advance(&self, from: NaiveDate) -> NaiveDate {
        match self {
            Self::Weekly => from + chrono::Duration::days(7),
            Self::Biweekly => from + chrono::Duration::days(14),
            Self::Monthly => from.checked_add_months(Months::new(1)).unwrap_or(from),
            Self::Quarterly => from.checked_add_months(Months::new(3)).unwrap_or(from),
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detected recurring-payment pattern for one merchant cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringPattern {
    pub merchant: String,
    pub category: String,
    pub average_amount: f64,
    pub frequency: Frequency,
    /// Recency-weighted average gap between charges, rounded to whole days.
    pub interval_days: i64,
    pub last_date: NaiveDate,
    pub next_expected_date: NaiveDate,
    /// 0-100 score combining interval regularity, amount regularity,
    /// and recency.
    pub confidence: f64,
    pub transactions: Vec<Transaction>,
    pub total_spent_this_year: f64,
    pub missed_payment: bool,
}

/// Budget health, ordered worst-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Exceeded,
    Danger,
    Warning,
    Safe,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exceeded => "exceeded",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Safe => "safe",
        }
    }

    /// Numeric rank for worst-first sorting (lower = worse).
    pub fn rank(&self) -> u8 {
        match self {
            Self::Exceeded => 0,
            Self::Danger => 1,
            Self::Warning => 2,
            Self::Safe => 3,
        }
    }
}

impl std::str::FromStr for BudgetStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exceeded" => Ok(Self::Exceeded),
            "danger" => Ok(Self::Danger),
            "warning" => Ok(Self::Warning),
            "safe" => Ok(Self::Safe),
            _ => Err(format!("Unknown budget status: {}", s)),
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Month-end projection for one budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetPrediction {
    pub category: String,
    pub current_spent: f64,
    pub predicted_spent: f64,
    pub predicted_overage: f64,
    pub percentage_used: f64,
    pub days_remaining: i64,
    pub daily_average: f64,
    /// Remaining budget spread over the remaining days. Negative when the
    /// budget is already blown; that is a meaningful signal, never clamped.
    pub recommended_daily_limit: f64,
    pub status: BudgetStatus,
    pub message: String,
}

/// What triggered a budget alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Prediction,
    Threshold,
    Exceeded,
    Recommendation,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prediction => "prediction",
            Self::Threshold => "threshold",
            Self::Exceeded => "exceeded",
            Self::Recommendation => "recommendation",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How urgent a budget alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A derived budget alert. The core only says the alert exists and what it
/// contains; escalation, notification, and persistence belong to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub category: String,
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    /// Suggested budget amount or daily cap, when the alert carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_amount: Option<f64>,
}
