//! Insight battery - behavioral spending insights
//!
//! A fixed-order battery of independent, pure detectors, each operating on
//! the preprocessed snapshot and returning zero or more `Insight` records.
//! The list order is detector-registration order, an explicit design choice:
//! there is no global severity re-ranking.
//!
//! ## Detectors, in order
//!
//! - **Category trend** - month-over-month change beyond ±25%
//! - **New category** - spend appearing with no last-month history
//! - **Weekend skew** - weekend vs weekday habits per category
//! - **Top category** - one category dominating the last 30 days
//! - **Spending spike** - one day far above the daily average
//! - **Spending velocity** - week-over-week acceleration
//! - **No-spend streak** - consecutive zero-spend days
//! - **Unusual transaction** - single charges far above the norm
//!
//! ## Usage
//!
//! ```rust,ignore
//! use spendsight_core::insights::InsightEngine;
//!
//! let snapshot = preprocess(&transactions, now);
//! let insights = InsightEngine::new().run(&snapshot, &config);
//! ```

pub mod concentration;
pub mod engine;
pub mod outlier;
pub mod spike;
pub mod streak;
pub mod trend;
pub mod types;
pub mod weekend;

pub use concentration::TopCategoryDetector;
pub use engine::{Detector, InsightEngine};
pub use outlier::UnusualTransactionDetector;
pub use spike::{SpendingSpikeDetector, SpendingVelocityDetector};
pub use streak::NoSpendStreakDetector;
pub use trend::{CategoryTrendDetector, NewCategoryDetector};
pub use types::{Insight, InsightKind};
pub use weekend::WeekendSkewDetector;
