//! Single-pass preprocessor
//!
//! Aggregates a raw transaction log into the time-bucketed snapshot every
//! downstream detector consumes. One O(n) pass, no I/O, no global clock: the
//! reference date is injected by the caller, so recomputing from the same
//! input always yields identical totals.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::merchants::normalize;
use crate::models::Transaction;

/// Time boundaries derived from the injected reference date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Boundaries {
    pub now: NaiveDate,
    pub month_start: NaiveDate,
    pub last_month_start: NaiveDate,
    pub last_month_end: NaiveDate,
    pub cutoff_30_days: NaiveDate,
    pub cutoff_14_days: NaiveDate,
    pub cutoff_7_days: NaiveDate,
}

impl Boundaries {
    pub fn from_now(now: NaiveDate) -> Self {
        let month_start = now.with_day(1).expect("day 1 always valid");
        let last_month_end = month_start.pred_opt().unwrap_or(month_start);
        let last_month_start = last_month_end.with_day(1).expect("day 1 always valid");
        Self {
            now,
            month_start,
            last_month_start,
            last_month_end,
            cutoff_30_days: now - Duration::days(30),
            cutoff_14_days: now - Duration::days(14),
            cutoff_7_days: now - Duration::days(7),
        }
    }
}

/// Grand totals per analysis period.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub this_month: f64,
    pub last_month: f64,
    pub last_30_days: f64,
    pub last_7_days: f64,
    pub previous_7_days: f64,
}

/// Per-category totals per analysis period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub this_month: HashMap<String, f64>,
    pub last_month: HashMap<String, f64>,
    pub last_30_days: HashMap<String, f64>,
}

/// Sum and observation count for one day of the week (0 = Sunday).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DayOfWeekStat {
    pub total: f64,
    pub count: u32,
}

/// Weekend-vs-weekday split for one category over the last 30 days.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WeekendSplit {
    pub weekend_total: f64,
    pub weekend_count: u32,
    pub weekday_total: f64,
    pub weekday_count: u32,
}

/// Running aggregate for one normalized merchant key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantAggregate {
    /// Raw name of the first transaction seen under this key.
    pub name: String,
    pub category: String,
    pub total: f64,
    pub count: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub transactions: Vec<Transaction>,
}

/// Metadata block suitable for use as an external cache key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub count: usize,
    pub earliest_date: Option<NaiveDate>,
    pub latest_date: Option<NaiveDate>,
}

impl SnapshotMeta {
    /// Stable key for time-boxed external caching of analysis results.
    pub fn cache_key(&self) -> String {
        let fmt = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "-".into());
        format!(
            "{}:{}:{}",
            self.count,
            fmt(self.earliest_date),
            fmt(self.latest_date)
        )
    }
}

/// The preprocessed snapshot consumed by all downstream detectors.
/// Pure derived data; never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub boundaries: Boundaries,
    pub this_month: Vec<Transaction>,
    pub last_month: Vec<Transaction>,
    pub last_30_days: Vec<Transaction>,
    pub last_7_days: Vec<Transaction>,
    pub previous_7_days: Vec<Transaction>,
    pub totals: PeriodTotals,
    pub category_totals: CategoryTotals,
    /// Per-day spend keyed by calendar date, last 30 days only.
    pub daily_totals: BTreeMap<NaiveDate, f64>,
    /// Indexed by day of week, 0 = Sunday. Last 30 days only.
    pub day_of_week: [DayOfWeekStat; 7],
    /// Weekend/weekday category split, last 30 days only.
    pub weekend_split: HashMap<String, WeekendSplit>,
    /// Normalized merchant key -> running aggregate.
    pub merchants: HashMap<String, MerchantAggregate>,
    /// Sum over the entire input set, all periods.
    pub grand_total: f64,
    pub meta: SnapshotMeta,
}

impl Snapshot {
    /// Average transaction amount over the entire input set.
    pub fn overall_average(&self) -> f64 {
        if self.meta.count == 0 {
            return 0.0;
        }
        self.grand_total / self.meta.count as f64
    }

    /// Average daily spend over the days present in the 30-day window.
    pub fn average_daily_spend(&self) -> f64 {
        if self.daily_totals.is_empty() {
            return 0.0;
        }
        self.daily_totals.values().sum::<f64>() / self.daily_totals.len() as f64
    }
}

/// Build the snapshot in one pass over the transactions.
pub fn preprocess(transactions: &[Transaction], now: NaiveDate) -> Snapshot {
    let boundaries = Boundaries::from_now(now);

    let mut this_month = Vec::new();
    let mut last_month = Vec::new();
    let mut last_30_days = Vec::new();
    let mut last_7_days = Vec::new();
    let mut previous_7_days = Vec::new();
    let mut totals = PeriodTotals::default();
    let mut category_totals = CategoryTotals::default();
    let mut daily_totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut day_of_week = [DayOfWeekStat::default(); 7];
    let mut weekend_split: HashMap<String, WeekendSplit> = HashMap::new();
    let mut merchants: HashMap<String, MerchantAggregate> = HashMap::new();
    let mut grand_total = 0.0;
    let mut earliest: Option<NaiveDate> = None;
    let mut latest: Option<NaiveDate> = None;

    for tx in transactions {
        let category = tx.category().to_string();
        grand_total += tx.amount;
        earliest = Some(earliest.map_or(tx.date, |d| d.min(tx.date)));
        latest = Some(latest.map_or(tx.date, |d| d.max(tx.date)));

        if tx.date >= boundaries.month_start {
            totals.this_month += tx.amount;
            *category_totals
                .this_month
                .entry(category.clone())
                .or_insert(0.0) += tx.amount;
            this_month.push(tx.clone());
        } else if tx.date >= boundaries.last_month_start && tx.date <= boundaries.last_month_end {
            totals.last_month += tx.amount;
            *category_totals
                .last_month
                .entry(category.clone())
                .or_insert(0.0) += tx.amount;
            last_month.push(tx.clone());
        }

        if tx.date >= boundaries.cutoff_30_days {
            totals.last_30_days += tx.amount;
            *category_totals
                .last_30_days
                .entry(category.clone())
                .or_insert(0.0) += tx.amount;
            last_30_days.push(tx.clone());

            *daily_totals.entry(tx.date).or_insert(0.0) += tx.amount;

            let dow = tx.date.weekday().num_days_from_sunday() as usize;
            day_of_week[dow].total += tx.amount;
            day_of_week[dow].count += 1;

            let split = weekend_split.entry(category.clone()).or_default();
            if dow == 0 || dow == 6 {
                split.weekend_total += tx.amount;
                split.weekend_count += 1;
            } else {
                split.weekday_total += tx.amount;
                split.weekday_count += 1;
            }
        }

        if tx.date >= boundaries.cutoff_7_days {
            totals.last_7_days += tx.amount;
            last_7_days.push(tx.clone());
        } else if tx.date >= boundaries.cutoff_14_days {
            totals.previous_7_days += tx.amount;
            previous_7_days.push(tx.clone());
        }

        let key = normalize(&tx.merchant);
        match merchants.get_mut(&key) {
            Some(agg) => {
                agg.total += tx.amount;
                agg.count += 1;
                agg.first_date = agg.first_date.min(tx.date);
                agg.last_date = agg.last_date.max(tx.date);
                agg.transactions.push(tx.clone());
            }
            None => {
                merchants.insert(
                    key,
                    MerchantAggregate {
                        name: tx.merchant.clone(),
                        category: category.clone(),
                        total: tx.amount,
                        count: 1,
                        first_date: tx.date,
                        last_date: tx.date,
                        transactions: vec![tx.clone()],
                    },
                );
            }
        }
    }

    debug!(
        count = transactions.len(),
        merchants = merchants.len(),
        this_month = totals.this_month,
        last_30_days = totals.last_30_days,
        "Preprocessed transaction log"
    );

    Snapshot {
        boundaries,
        this_month,
        last_month,
        last_30_days,
        last_7_days,
        previous_7_days,
        totals,
        category_totals,
        daily_totals,
        day_of_week,
        weekend_split,
        merchants,
        grand_total,
        meta: SnapshotMeta {
            count: transactions.len(),
            earliest_date: earliest,
            latest_date: latest,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(date: &str, merchant: &str, category: &str, amount: f64) -> Transaction {
        Transaction::new(
            date.parse().unwrap(),
            merchant,
            Some(category.to_string()),
            amount,
        )
    }

    fn now() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 20).unwrap()
    }

    #[test]
    fn test_boundaries() {
        let b = Boundaries::from_now(now());
        assert_eq!(b.month_start, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        assert_eq!(
            b.last_month_start,
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()
        );
        assert_eq!(
            b.last_month_end,
            NaiveDate::from_ymd_opt(2026, 7, 31).unwrap()
        );
        assert_eq!(
            b.cutoff_7_days,
            NaiveDate::from_ymd_opt(2026, 8, 13).unwrap()
        );
    }

    #[test]
    fn test_period_assignment() {
        let txs = vec![
            tx("2026-08-18", "Coffee", "Food", 50_000.0),  // last 7 days + this month
            tx("2026-08-08", "Grocer", "Food", 120_000.0), // previous 7 days + this month
            tx("2026-07-25", "Grocer", "Food", 90_000.0),  // last month + last 30 days
            tx("2026-05-01", "Rent", "Housing", 5_000_000.0), // outside every window
        ];
        let snap = preprocess(&txs, now());

        assert_eq!(snap.totals.this_month, 170_000.0);
        assert_eq!(snap.totals.last_month, 90_000.0);
        assert_eq!(snap.totals.last_7_days, 50_000.0);
        assert_eq!(snap.totals.previous_7_days, 120_000.0);
        assert_eq!(snap.totals.last_30_days, 260_000.0);
        assert_eq!(snap.this_month.len(), 2);
        assert_eq!(snap.last_month.len(), 1);
        assert_eq!(snap.grand_total, 5_260_000.0);
    }

    #[test]
    fn test_category_mass_conservation() {
        let txs = vec![
            tx("2026-08-18", "Coffee", "Food", 50_000.0),
            tx("2026-08-10", "Cinema", "Entertainment", 200_000.0),
            tx("2026-08-03", "Grocer", "Food", 300_000.0),
            tx("2026-07-20", "Cinema", "Entertainment", 150_000.0),
        ];
        let snap = preprocess(&txs, now());

        let sum_this: f64 = snap.category_totals.this_month.values().sum();
        assert_eq!(sum_this, snap.totals.this_month);
        let sum_last: f64 = snap.category_totals.last_month.values().sum();
        assert_eq!(sum_last, snap.totals.last_month);
        let sum_30: f64 = snap.category_totals.last_30_days.values().sum();
        assert_eq!(sum_30, snap.totals.last_30_days);
    }

    #[test]
    fn test_day_of_week_and_weekend_split() {
        // 2026-08-16 is a Sunday, 2026-08-17 a Monday
        let txs = vec![
            tx("2026-08-16", "Cafe", "Food", 100_000.0),
            tx("2026-08-17", "Cafe", "Food", 40_000.0),
        ];
        let snap = preprocess(&txs, now());

        assert_eq!(snap.day_of_week[0].count, 1);
        assert_eq!(snap.day_of_week[0].total, 100_000.0);
        assert_eq!(snap.day_of_week[1].count, 1);

        let split = &snap.weekend_split["Food"];
        assert_eq!(split.weekend_total, 100_000.0);
        assert_eq!(split.weekend_count, 1);
        assert_eq!(split.weekday_total, 40_000.0);
        assert_eq!(split.weekday_count, 1);
    }

    #[test]
    fn test_merchant_aggregates_use_normalized_keys() {
        let txs = vec![
            tx("2026-08-10", "NETFLIX.COM", "Entertainment", 260_000.0),
            tx("2026-08-15", "Netflix.com ", "Entertainment", 260_000.0),
        ];
        let snap = preprocess(&txs, now());

        assert_eq!(snap.merchants.len(), 1);
        let agg = &snap.merchants["netflixcom"];
        assert_eq!(agg.count, 2);
        assert_eq!(agg.total, 520_000.0);
        assert_eq!(agg.name, "NETFLIX.COM");
        assert_eq!(agg.first_date, "2026-08-10".parse::<NaiveDate>().unwrap());
        assert_eq!(agg.last_date, "2026-08-15".parse::<NaiveDate>().unwrap());
    }

    #[test]
    fn test_meta_cache_key() {
        let snap = preprocess(&[], now());
        assert_eq!(snap.meta.count, 0);
        assert_eq!(snap.meta.cache_key(), "0:-:-");
        assert_eq!(snap.overall_average(), 0.0);
        assert_eq!(snap.average_daily_spend(), 0.0);

        let txs = vec![
            tx("2026-08-10", "A", "Food", 10.0),
            tx("2026-08-12", "B", "Food", 30.0),
        ];
        let snap = preprocess(&txs, now());
        assert_eq!(snap.meta.cache_key(), "2:2026-08-10:2026-08-12");
        assert_eq!(snap.overall_average(), 20.0);
    }
}
