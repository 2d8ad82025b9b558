//! Hearth Core Library
//!
//! Calculation engine for the Hearth household finance dashboard:
//! - Ledger data model (obligations, payments, expenses, income, budgets)
//! - Burn rate, free cash flow and savings rate
//! - Debt avalanche ordering and amortization projections
//! - Payment cycle scheduling and levy discount status
//! - Month-over-month spending analytics with rule-based insights
//! - Keyword categorizer with per-user overrides
//! - Pluggable AI summarizer with a local fallback
//! - Prompt library for customizable AI prompts
//!
//! All calculations are synchronous and take "today" as an argument. Only
//! the optional AI narrative is async.

pub mod ai;
pub mod analytics;
pub mod calendar;
pub mod categories;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod finance;
pub mod insights;
pub mod models;
pub mod prompts;

/// Test utilities including mock OpenAI-compatible summary server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{
    local_summary, summarize_or_fallback, AIClient, AiSummary, FallbackReason, FinancialSnapshot,
    MockBackend, NarrativeOutcome, NarrativeSource, OpenAICompatibleBackend, SummaryBackend, Trend,
};
pub use analytics::{spending_analytics, AnalyticsQuery, SpendingAnalytics};
pub use categories::{Categorizer, InMemoryOverrideStore, KeywordOverrideStore, KeywordOverrides};
pub use config::EngineConfig;
pub use dashboard::{Dashboard, DashboardReport};
pub use error::{Error, Result};
pub use finance::{
    budget_statuses, burn_rate, cash_flow, debt_priority, discount_status, payoff_months,
    total_debt, upcoming_payments, variable_costs, BudgetStatus, CashFlow, DebtProjection,
    DiscountStatus, PayoffEstimate, UpcomingPayment,
};
pub use insights::{Insight, InsightGenerator, InsightKind};
pub use models::{
    Budget, Expense, ExpenseCategory, Income, LedgerSnapshot, MonthKey, Obligation, Payment,
    Person, ValidationIssue,
};
pub use prompts::{Prompt, PromptId, PromptLibrary};
