//! Cash flow and budget command implementations

use anyhow::Result;
use hearth_core::finance::{budget_statuses, cash_flow, CashPosition};
use hearth_core::{Expense, Income};

use super::{print_json, Session};

pub fn cmd_cashflow(session: &Session, month: Option<&str>) -> Result<()> {
    let month = session.month(month)?;
    let ledger = &session.ledger;

    let incomes: Vec<Income> = ledger
        .incomes
        .iter()
        .filter(|i| month.contains(i.date))
        .cloned()
        .collect();
    let expenses: Vec<Expense> = ledger
        .expenses
        .iter()
        .filter(|e| month.contains(e.date))
        .cloned()
        .collect();

    let flow = cash_flow(ledger.monthly_income, &ledger.obligations, &incomes, &expenses);

    if session.json {
        return print_json(&flow);
    }

    let position = match flow.position {
        CashPosition::Surplus => "🟢 Surplus",
        CashPosition::Deficit => "🔴 Deficit",
    };

    println!();
    println!("💰 Cash Flow: {}", month);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Income:            {:>12.2}", flow.total_income);
    println!("   Essential costs:   {:>12.2}", -flow.burn_rate);
    println!("   Variable costs:    {:>12.2}", -flow.variable_costs);
    println!(
        "   Expenses:          {:>12.2}  ({} items)",
        -flow.total_expenses,
        expenses.len()
    );
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Free cash flow:    {:>12.2}  {}", flow.free_cash_flow, position);
    println!("   Savings rate:      {:>11.1}%", flow.savings_rate);

    Ok(())
}

pub fn cmd_budgets(session: &Session, month: Option<&str>) -> Result<()> {
    let month = session.month(month)?;
    let statuses = budget_statuses(&session.ledger.budgets, &session.ledger.expenses, month);

    if session.json {
        return print_json(&statuses);
    }

    if statuses.is_empty() {
        println!("No budgets in this snapshot.");
        return Ok(());
    }

    println!();
    println!("🎯 Budgets: {}", month);
    println!("   ─────────────────────────────────────────────────────────────");

    for status in &statuses {
        let icon = if status.over_budget {
            "🔴"
        } else if status.percent_used >= 80.0 {
            "🟡"
        } else {
            "🟢"
        };
        let scope = status.person_id.as_deref().unwrap_or("household");
        println!(
            "   {} {:16} │ {:12} │ {:>10.2} / {:>10.2} │ {:>5.1}%",
            icon,
            status.category.label(),
            scope,
            status.spent,
            status.limit,
            status.percent_used
        );
    }

    Ok(())
}
