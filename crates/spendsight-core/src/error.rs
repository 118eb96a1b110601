//! Error types for spendsight
//!
//! The analysis passes themselves are infallible: degenerate data (too few
//! transactions, zero denominators, empty periods) yields empty results.
//! Errors only arise from input records that violate the documented
//! preconditions, surfaced by the validation helpers in `models`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Invalid budget: {0}")]
    InvalidBudget(String),

    #[error("Invalid month key '{0}': expected YYYY-MM")]
    InvalidMonthKey(String),
}

pub type Result<T> = std::result::Result<T, Error>;
