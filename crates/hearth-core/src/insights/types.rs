//! Core types for rule-based insights

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::ExpenseCategory;

/// Month-over-month change (percent) beyond which overall spend is
/// reported as rising or falling
pub const TREND_CHANGE_PCT: f64 = 10.0;

/// Share of the month's spend (percent) at which a single category is
/// flagged as dominant
pub const CATEGORY_SHARE_PCT: f64 = 40.0;

/// Month-over-month change (percent) at which a category's movement is
/// reported
pub const CATEGORY_CHANGE_PCT: f64 = 50.0;

/// Smallest category amount considered for change insights
pub const CATEGORY_MIN_AMOUNT: f64 = 100.0;

/// Most category-change insights reported for one month
pub const MAX_CATEGORY_INSIGHTS: usize = 3;

/// Kinds of insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Spending went up
    Increase,
    /// Spending went down
    Decrease,
    /// Neutral observation
    Info,
    /// Something worth acting on
    Warning,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Increase => "increase",
            InsightKind::Decrease => "decrease",
            InsightKind::Info => "info",
            InsightKind::Warning => "warning",
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
        match s {
            "increase" => Ok(InsightKind::Increase),
            "decrease" => Ok(InsightKind::Decrease),
            "info" => Ok(InsightKind::Info),
            "warning" => Ok(InsightKind::Warning),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// A short structured observation about the month's spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
    /// Category the insight is about, if any
    pub category: Option<ExpenseCategory>,
    /// Percent change the insight cites, if any
    pub change: Option<f64>,
}

impl Insight {
    pub fn new(kind: InsightKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            category: None,
            change: None,
        }
    }

    pub fn with_category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_change(mut self, change: f64) -> Self {
        self.change = Some(change);
        self
    }
}

/// Tunable thresholds for the built-in rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightThresholds {
    pub trend_change_pct: f64,
    pub category_share_pct: f64,
    pub category_change_pct: f64,
    pub category_min_amount: f64,
    pub max_category_insights: usize,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            trend_change_pct: TREND_CHANGE_PCT,
            category_share_pct: CATEGORY_SHARE_PCT,
            category_change_pct: CATEGORY_CHANGE_PCT,
            category_min_amount: CATEGORY_MIN_AMOUNT,
            max_category_insights: MAX_CATEGORY_INSIGHTS,
        }
    }
}
