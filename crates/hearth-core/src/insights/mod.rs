//! Rule-based spending insights
//!
//! Short structured observations derived from the monthly analytics,
//! independent of any AI service. Rules are registered with an
//! `InsightGenerator` and run in a fixed order.
//!
//! ## Built-in rules
//!
//! - **History** - no previous month to compare against
//! - **Overall trend** - total spend rising, falling or stable
//! - **Category share** - one category dominating the month
//! - **Category change** - categories that moved sharply since last month

pub mod engine;
pub mod rules;
pub mod types;

pub use engine::{InsightGenerator, InsightRule};
pub use rules::{CategoryChangeRule, CategoryShareRule, HistoryRule, OverallTrendRule};
pub use types::{
    Insight, InsightKind, InsightThresholds, CATEGORY_CHANGE_PCT, CATEGORY_MIN_AMOUNT,
    CATEGORY_SHARE_PCT, MAX_CATEGORY_INSIGHTS, TREND_CHANGE_PCT,
};
