//! Core types for the insight battery

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Broad class of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    /// Directional change over time (month-over-month, week-over-week)
    Trend,
    /// A recurring or structural behavior worth knowing about
    Pattern,
    /// Something that probably deserves attention now
    Alert,
    /// A suggestion the user may act on
    Tip,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Trend => "trend",
            InsightKind::Pattern => "pattern",
            InsightKind::Alert => "alert",
            InsightKind::Tip => "tip",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trend" => Ok(InsightKind::Trend),
            "pattern" => Ok(InsightKind::Pattern),
            "alert" => Ok(InsightKind::Alert),
            "tip" => Ok(InsightKind::Tip),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// A single behavioral insight. Purely informational; ordering across the
/// whole list follows detector registration order, not severity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub title: String,
    pub description: String,
    /// The amount the insight is about, when one applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Percent change relative to the comparison period, when one applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
}

impl Insight {
    pub fn new(kind: InsightKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            category: None,
            title: title.into(),
            description: description.into(),
            value: None,
            change: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_change(mut self, change: f64) -> Self {
        self.change = Some(change);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [
            InsightKind::Trend,
            InsightKind::Pattern,
            InsightKind::Alert,
            InsightKind::Tip,
        ] {
            assert_eq!(InsightKind::from_str(kind.as_str()).unwrap(), kind);
        }
        assert!(InsightKind::from_str("bogus").is_err());
    }

    #[test]
    fn test_insight_builder() {
        let insight = Insight::new(InsightKind::Trend, "Food up", "Food spending rose 40%")
            .with_category("Food")
            .with_value(1_400_000.0)
            .with_change(40.0);
        assert_eq!(insight.category.as_deref(), Some("Food"));
        assert_eq!(insight.change, Some(40.0));
    }
}
