//! Spendsight Core Library
//!
//! The spending-analytics engine for the spendsight personal finance tool:
//! - Single-pass preprocessing of transaction logs into time-bucketed totals
//! - Merchant normalization and fuzzy grouping
//! - Recurring-payment pattern detection with confidence scoring
//! - Month-end budget projections and severity-ranked alerts
//! - A fixed battery of behavioral insight detectors
//!
//! The engine performs no I/O and reads no global clock: callers supply the
//! transaction and budget records plus an explicit reference date, and get
//! plain serializable result records back. Callers own validation; the
//! helpers on `Transaction` and `Budget` check the documented preconditions.

pub mod analyzer;
pub mod budget;
pub mod config;
pub mod error;
pub mod insights;
pub mod merchants;
pub mod models;
pub mod preprocess;
pub mod recurring;
pub mod stats;

pub use analyzer::{AnalysisReport, SpendingAnalyzer};
pub use budget::{calculate_predictions, generate_alerts};
pub use config::AnalyzerConfig;
pub use error::{Error, Result};
pub use insights::{Detector, Insight, InsightEngine, InsightKind};
pub use merchants::{group_transactions, normalize, similarity, MerchantCluster};
pub use models::{
    AlertKind, AlertSeverity, Budget, BudgetAlert, BudgetPrediction, BudgetStatus, Frequency,
    RecurringPattern, Transaction,
};
pub use preprocess::{preprocess, Snapshot, SnapshotMeta};
pub use recurring::detect_recurring;
