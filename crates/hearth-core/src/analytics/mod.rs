//! Monthly spending analytics
//!
//! Buckets expenses into a target month, the month before it and a
//! history window, then ranks categories and runs the insight rules over
//! the result.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hearth_core::analytics::{spending_analytics, AnalyticsQuery};
//!
//! let query = AnalyticsQuery::new("2025-03".parse()?).with_lookback(6);
//! let analytics = spending_analytics(query, &snapshot.expenses, today);
//! ```

pub mod aggregator;
pub mod types;

pub use aggregator::{elapsed_days, percent_change, spending_analytics, spending_analytics_with};
pub use types::{
    AnalyticsQuery, CategoryShare, MonthSummary, MonthlyTotal, SpendingAnalytics,
    DEFAULT_LOOKBACK_MONTHS, MAX_LOOKBACK_MONTHS,
};
