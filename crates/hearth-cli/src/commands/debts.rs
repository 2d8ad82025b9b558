//! Debt command implementations

use anyhow::Result;
use hearth_core::finance::{debt_plan, payoff_estimate, total_debt, PayoffEstimate};
use serde_json::json;

use super::{print_json, truncate, Session};

fn describe(estimate: &PayoffEstimate) -> String {
    match estimate {
        PayoffEstimate::Months { months } => format!("{} months", months),
        PayoffEstimate::NotComputable => "n/a".to_string(),
        PayoffEstimate::NeverAmortizes { monthly_interest } => {
            format!("never (interest {:.2}/month)", monthly_interest)
        }
    }
}

pub fn cmd_debts(session: &Session) -> Result<()> {
    let plan = debt_plan(&session.ledger.obligations, session.today);
    let total = total_debt(&session.ledger.obligations);

    if session.json {
        return print_json(&json!({
            "total_debt": total,
            "debts": plan,
        }));
    }

    if plan.is_empty() {
        println!("No outstanding debts. 🎉");
        return Ok(());
    }

    println!();
    println!("💳 Debts (highest interest first)");
    println!("   ─────────────────────────────────────────────────────────────");

    for debt in &plan {
        let finish = debt
            .payoff_month
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "   {:20} │ {:>11.2} │ {:>5.2}% │ {:>9.2}/mo │ {:>12} │ {}",
            truncate(&debt.name, 20),
            debt.balance,
            debt.interest_rate,
            debt.monthly_payment,
            describe(&debt.payoff),
            finish
        );
    }

    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Total debt: {:.2}", total);

    Ok(())
}

pub fn cmd_payoff(balance: f64, payment: f64, rate: f64, json: bool) -> Result<()> {
    let estimate = payoff_estimate(balance, payment, rate);

    if json {
        return print_json(&estimate);
    }

    println!(
        "🧮 {:.2} at {:.2}% paying {:.2}/month: {}",
        balance,
        rate,
        payment,
        describe(&estimate)
    );
    if let PayoffEstimate::NeverAmortizes { monthly_interest } = estimate {
        println!(
            "   ⚠️  Pay more than {:.2} a month to reduce the balance",
            monthly_interest
        );
    }

    Ok(())
}
