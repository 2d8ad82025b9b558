//! Free cash flow and savings rate

use serde::Serialize;

use super::obligations::{burn_rate, variable_costs};
use crate::models::{Expense, Income, Obligation};

/// Whether the month ends with money left over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CashPosition {
    Surplus,
    Deficit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlow {
    /// Salary plus extra income
    pub total_income: f64,
    pub burn_rate: f64,
    pub variable_costs: f64,
    pub total_expenses: f64,
    pub free_cash_flow: f64,
    /// Percent of total income left over; 0 without income
    pub savings_rate: f64,
    pub position: CashPosition,
}

/// Combine salary, extra income, obligations and expenses for one period.
///
/// Callers pass the incomes and expenses that fall in the period they care
/// about; nothing is filtered by date here.
pub fn cash_flow(
    monthly_income: f64,
    obligations: &[Obligation],
    incomes: &[Income],
    expenses: &[Expense],
) -> CashFlow {
    let extra_income: f64 = incomes.iter().map(|i| i.amount).sum();
    let total_income = monthly_income + extra_income;

    let burn = burn_rate(obligations);
    let variable = variable_costs(obligations);
    let total_expenses: f64 = expenses.iter().map(|e| e.amount).sum();

    let free_cash_flow = total_income - burn - variable - total_expenses;
    let savings_rate = if total_income == 0.0 {
        0.0
    } else {
        free_cash_flow / total_income * 100.0
    };

    CashFlow {
        total_income,
        burn_rate: burn,
        variable_costs: variable,
        total_expenses,
        free_cash_flow,
        savings_rate,
        position: if free_cash_flow >= 0.0 {
            CashPosition::Surplus
        } else {
            CashPosition::Deficit
        },
    }
}
