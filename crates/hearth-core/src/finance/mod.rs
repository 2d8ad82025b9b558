//! Ledger calculators
//!
//! Pure, synchronous transforms over a ledger snapshot. None of these
//! functions perform I/O or read the clock; "today" is always passed in.
//!
//! ## Calculators
//!
//! - **Obligations** - essential vs variable classification, burn rate
//! - **Debt** - avalanche ordering, total debt, amortization
//! - **Schedule** - next due date per obligation for the current cycle
//! - **Levy** - early-payment discount status for one recurring obligation
//! - **Cash flow** - free cash flow and savings rate
//! - **Budgets** - per-category monthly budget usage

pub mod budgets;
pub mod cashflow;
pub mod debt;
pub mod levy;
pub mod obligations;
pub mod schedule;

pub use budgets::{budget_statuses, BudgetStatus};
pub use cashflow::{cash_flow, CashFlow, CashPosition};
pub use debt::{
    debt_plan, debt_priority, payoff_estimate, payoff_months, total_debt, DebtProjection,
    PayoffEstimate, MAX_PAYOFF_MONTHS,
};
pub use levy::{discount_status, DiscountStatus};
pub use obligations::{burn_rate, classify, variable_costs, ObligationBuckets};
pub use schedule::{due_date_for, sort_by_due, upcoming_payments, UpcomingPayment};
