//! Types produced by the monthly analytics aggregator

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::insights::Insight;
use crate::models::{ExpenseCategory, MonthKey};

/// Default number of months in the history window
pub const DEFAULT_LOOKBACK_MONTHS: u32 = 6;

/// Longest history window the aggregator will chart
pub const MAX_LOOKBACK_MONTHS: u32 = 120;

/// Which month to analyze and how far back to chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsQuery {
    pub target_month: MonthKey,
    /// Months in the history window, ending at the target month
    #[serde(default = "default_lookback")]
    pub lookback_months: u32,
}

fn default_lookback() -> u32 {
    DEFAULT_LOOKBACK_MONTHS
}

impl AnalyticsQuery {
    pub fn new(target_month: MonthKey) -> Self {
        Self {
            target_month,
            lookback_months: DEFAULT_LOOKBACK_MONTHS,
        }
    }

    pub fn with_lookback(mut self, months: u32) -> Self {
        self.lookback_months = months;
        self
    }

    /// Lookback actually used: at least the target month, at most
    /// [`MAX_LOOKBACK_MONTHS`]
    pub fn effective_lookback(&self) -> u32 {
        self.lookback_months.clamp(1, MAX_LOOKBACK_MONTHS)
    }
}

/// Spend for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub total: f64,
    pub by_category: BTreeMap<ExpenseCategory, f64>,
    pub transaction_count: usize,
}

impl MonthSummary {
    pub fn empty(month: MonthKey) -> Self {
        Self {
            month,
            total: 0.0,
            by_category: BTreeMap::new(),
            transaction_count: 0,
        }
    }

    pub fn category_total(&self, category: ExpenseCategory) -> f64 {
        self.by_category.get(&category).copied().unwrap_or(0.0)
    }
}

/// One point in the charted history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: MonthKey,
    pub total: f64,
    pub by_category: BTreeMap<ExpenseCategory, f64>,
}

/// A category's share of the target month's spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: ExpenseCategory,
    pub amount: f64,
    /// Percent of the month total; 0 when the total is 0
    pub percentage: f64,
    pub transaction_count: usize,
}

/// Month-over-month spending analysis for a target month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingAnalytics {
    pub current_month: MonthSummary,
    pub previous_month: MonthSummary,
    /// Percent change vs the previous month; 0 when there is nothing to
    /// compare against (see `has_previous_data`)
    pub month_over_month_change: f64,
    /// The previous month has spend to compare against
    pub has_previous_data: bool,
    /// Oldest first, ending at the target month
    pub history: Vec<MonthlyTotal>,
    pub avg_daily_spending: f64,
    /// Days of the target month counted toward the daily average
    pub elapsed_days: u32,
    /// Every category with spend this month, largest first
    pub top_categories: Vec<CategoryShare>,
    pub insights: Vec<Insight>,
}
