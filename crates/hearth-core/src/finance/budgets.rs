//! Budget tracking against monthly spend

use serde::Serialize;

use crate::models::{Budget, Expense, ExpenseCategory, MonthKey};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub category: ExpenseCategory,
    pub person_id: Option<String>,
    pub limit: f64,
    pub spent: f64,
    pub remaining: f64,
    pub percent_used: f64,
    pub over_budget: bool,
}

/// Spend against each budget for `month`.
///
/// Person-scoped budgets only count that person's expenses; household
/// budgets count everyone's.
pub fn budget_statuses(
    budgets: &[Budget],
    expenses: &[Expense],
    month: MonthKey,
) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|budget| {
            let spent: f64 = expenses
                .iter()
                .filter(|e| e.category == budget.category && month.contains(e.date))
                .filter(|e| match &budget.person_id {
                    Some(person) => e.person_id.as_deref() == Some(person.as_str()),
                    None => true,
                })
                .map(|e| e.amount)
                .sum();

            let percent_used = if budget.limit > 0.0 {
                spent / budget.limit * 100.0
            } else {
                0.0
            };

            BudgetStatus {
                category: budget.category,
                person_id: budget.person_id.clone(),
                limit: budget.limit,
                spent,
                remaining: budget.limit - spent,
                percent_used,
                over_budget: spent > budget.limit,
            }
        })
        .collect()
}
