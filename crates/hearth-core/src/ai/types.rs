//! Summarizer request and response types
//!
//! These types are backend-agnostic and used across all summarizer
//! implementations.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::finance::BudgetStatus;
use crate::models::{ExpenseCategory, MonthKey};

/// Structured monthly snapshot sent to the summarizer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSnapshot {
    pub month: MonthKey,
    /// Salary
    pub monthly_income: f64,
    /// Non-salary income in the month
    pub extra_income: f64,
    pub total_income: f64,
    pub obligations: Vec<SnapshotObligation>,
    pub expenses_by_category: BTreeMap<ExpenseCategory, f64>,
    pub total_expenses: f64,
    pub incomes: Vec<SnapshotIncome>,
    pub budgets: Vec<BudgetStatus>,
    pub burn_rate: f64,
    pub variable_costs: f64,
    pub free_cash_flow: f64,
    pub savings_rate: f64,
    pub month_over_month_change: f64,
}

impl FinancialSnapshot {
    pub fn over_budget(&self) -> impl Iterator<Item = &BudgetStatus> {
        self.budgets.iter().filter(|b| b.over_budget)
    }

    pub fn has_over_budget(&self) -> bool {
        self.over_budget().next().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotObligation {
    pub name: String,
    pub amount: f64,
    pub category: Option<String>,
    pub is_essential: bool,
    pub is_debt: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotIncome {
    pub source: String,
    pub amount: f64,
}

/// Overall direction of the household's finances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Concerning,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Concerning => "concerning",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Narrative summary of a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AiSummary {
    /// Two or three sentences about the month
    pub summary: String,
    /// Notable or positive observations
    #[serde(default)]
    pub highlights: Vec<String>,
    /// Concrete next steps
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub trend: Trend,
}

/// JSON Schema describing the summary the model must return
pub fn summary_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(AiSummary)).unwrap_or_default()
}

/// Why the local summary was used instead of the AI one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No AI backend configured
    NotConfigured,
    Unauthorized,
    RateLimited,
    /// Response wasn't a valid summary
    Malformed,
    Unavailable,
    Timeout,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::NotConfigured => "not_configured",
            FallbackReason::Unauthorized => "unauthorized",
            FallbackReason::RateLimited => "rate_limited",
            FallbackReason::Malformed => "malformed",
            FallbackReason::Unavailable => "unavailable",
            FallbackReason::Timeout => "timeout",
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a narrative came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum NarrativeSource {
    Ai { model: String },
    Fallback { reason: FallbackReason },
}

/// A summary plus its provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeOutcome {
    pub summary: AiSummary,
    #[serde(flatten)]
    pub source: NarrativeSource,
}

impl NarrativeOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, NarrativeSource::Fallback { .. })
    }
}
