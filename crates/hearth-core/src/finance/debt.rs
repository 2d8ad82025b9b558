//! Debt prioritization and amortization
//!
//! Debts are ordered highest interest first (the avalanche method). That
//! ordering is the policy; callers display it as-is.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{MonthKey, Obligation};

/// Longest payoff period reported as a schedule; anything longer is treated
/// as a payment that never meaningfully amortizes the balance.
pub const MAX_PAYOFF_MONTHS: u32 = 1200;

/// Tolerance for float noise before rounding a month count up
const MONTH_EPSILON: f64 = 1e-9;

/// Total outstanding principal across active obligations
pub fn total_debt(obligations: &[Obligation]) -> f64 {
    obligations
        .iter()
        .filter(|o| o.is_active)
        .map(|o| o.total_balance.unwrap_or(0.0))
        .sum()
}

/// Active debts with a positive balance, highest interest rate first.
///
/// Ties keep insertion order.
pub fn debt_priority(obligations: &[Obligation]) -> Vec<&Obligation> {
    let mut debts: Vec<&Obligation> = obligations
        .iter()
        .filter(|o| o.is_active && o.total_balance.is_some_and(|b| b > 0.0))
        .collect();

    // sort_by is stable
    debts.sort_by(|a, b| {
        let rate_a = a.interest_rate.unwrap_or(0.0);
        let rate_b = b.interest_rate.unwrap_or(0.0);
        rate_b
            .partial_cmp(&rate_a)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debts
}

/// Months needed to pay off `balance` with a fixed `monthly_payment` at
/// `annual_rate_percent` compounded monthly.
///
/// Returns `Ok(0)` when the inputs don't describe a schedule (no balance or
/// no payment); callers must read 0 as "not computable", not "paid off".
/// Returns `Error::NonAmortizing` when the payment does not cover the
/// interest accruing each month.
pub fn payoff_months(balance: f64, monthly_payment: f64, annual_rate_percent: f64) -> Result<u32> {
    if !(monthly_payment > 0.0) || !(balance > 0.0) {
        return Ok(0);
    }

    let monthly_rate = annual_rate_percent.max(0.0) / 100.0 / 12.0;

    let months = if monthly_rate == 0.0 {
        balance / monthly_payment
    } else {
        let interest_share = monthly_rate * balance / monthly_payment;
        if interest_share >= 1.0 {
            return Err(Error::NonAmortizing {
                monthly_interest: monthly_rate * balance,
                payment: monthly_payment,
            });
        }
        -(1.0 - interest_share).ln() / (1.0 + monthly_rate).ln()
    };

    let months = (months - MONTH_EPSILON).ceil();
    if !months.is_finite() || months > MAX_PAYOFF_MONTHS as f64 {
        return Err(Error::NonAmortizing {
            monthly_interest: monthly_rate * balance,
            payment: monthly_payment,
        });
    }

    Ok(months.max(1.0) as u32)
}

/// Typed outcome of an amortization estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PayoffEstimate {
    /// Paid off after this many monthly payments
    Months { months: u32 },
    /// No balance or no payment to project
    NotComputable,
    /// The payment never covers accruing interest
    NeverAmortizes { monthly_interest: f64 },
}

impl PayoffEstimate {
    pub fn months(&self) -> Option<u32> {
        match self {
            Self::Months { months } => Some(*months),
            _ => None,
        }
    }
}

/// `payoff_months` as a closed set of outcomes instead of a sentinel
pub fn payoff_estimate(
    balance: f64,
    monthly_payment: f64,
    annual_rate_percent: f64,
) -> PayoffEstimate {
    match payoff_months(balance, monthly_payment, annual_rate_percent) {
        Ok(0) => PayoffEstimate::NotComputable,
        Ok(months) => PayoffEstimate::Months { months },
        Err(Error::NonAmortizing {
            monthly_interest, ..
        }) => PayoffEstimate::NeverAmortizes { monthly_interest },
        Err(_) => PayoffEstimate::NotComputable,
    }
}

/// Payoff projection for one debt
#[derive(Debug, Clone, Serialize)]
pub struct DebtProjection {
    pub obligation_id: String,
    pub name: String,
    pub balance: f64,
    pub monthly_payment: f64,
    pub interest_rate: f64,
    pub payoff: PayoffEstimate,
    /// Month of the final payment, assuming the first lands this month
    pub payoff_month: Option<MonthKey>,
}

/// Avalanche-ordered debts with a payoff projection for each
pub fn debt_plan(obligations: &[Obligation], today: NaiveDate) -> Vec<DebtProjection> {
    let current = MonthKey::from_date(today);

    debt_priority(obligations)
        .into_iter()
        .map(|debt| {
            let balance = debt.total_balance.unwrap_or(0.0);
            let rate = debt.interest_rate.unwrap_or(0.0);
            let payoff = payoff_estimate(balance, debt.amount, rate);
            let payoff_month = payoff
                .months()
                .map(|months| current.plus_months(months.saturating_sub(1)));

            DebtProjection {
                obligation_id: debt.id.clone(),
                name: debt.name.clone(),
                balance,
                monthly_payment: debt.amount,
                interest_rate: rate,
                payoff,
                payoff_month,
            }
        })
        .collect()
}
