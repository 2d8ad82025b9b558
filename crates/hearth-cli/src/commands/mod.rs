//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared session loading (snapshot, today, config) and output helpers
//! - `analytics` - Monthly spending analytics with optional AI narrative
//! - `schedule` - Upcoming debit orders and levy discount status
//! - `debts` - Debt payoff order and the payoff calculator
//! - `cashflow` - Free cash flow and budget usage
//! - `categorize` - Keyword categorizer

pub mod analytics;
pub mod cashflow;
pub mod categorize;
pub mod core;
pub mod debts;
pub mod schedule;

// Re-export command functions for main.rs
pub use analytics::*;
pub use cashflow::*;
pub use categorize::*;
pub use self::core::*;
pub use debts::*;
pub use schedule::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
