//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `budgets` - Budget projection and alert commands
//! - `input` - CSV/JSON loading, validation, and date resolution
//! - `insights` - Insight battery command
//! - `recurring` - Recurring payment detection command
//! - `report` - Combined report command

pub mod budgets;
pub mod input;
pub mod insights;
pub mod recurring;
pub mod report;

// Re-export command functions for main.rs
pub use budgets::*;
pub use insights::*;
pub use recurring::*;
pub use report::*;

/// Truncate a string to a maximum number of characters, adding "..." if
/// truncated. Counts chars, not bytes: merchant names are arbitrary UTF-8.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
