//! Upcoming payment and levy command implementations

use anyhow::Result;
use hearth_core::finance::{discount_status, upcoming_payments, DiscountStatus};
use hearth_core::Obligation;

use super::{print_json, truncate, Session};

pub fn cmd_upcoming(session: &Session, payday: Option<u32>) -> Result<()> {
    let payday = payday.unwrap_or(session.config.payday);
    let upcoming = upcoming_payments(
        &session.ledger.obligations,
        &session.ledger.payments,
        payday,
        session.today,
    );

    if session.json {
        return print_json(&upcoming);
    }

    if upcoming.is_empty() {
        println!("No active obligations in this snapshot.");
        return Ok(());
    }

    println!();
    println!("📅 Upcoming Payments (as of {})", session.today);
    println!("   ─────────────────────────────────────────────────────────────");

    for item in &upcoming {
        let status = if item.is_paid {
            "✅ paid"
        } else if item.days_until < 0 {
            "🔴 overdue"
        } else {
            "⏳ due"
        };
        println!(
            "   {:24} │ {:>10.2} │ {} │ {:>3} days │ {}",
            truncate(&item.obligation.name, 24),
            item.obligation.amount,
            item.due_date,
            item.days_until,
            status
        );
    }

    Ok(())
}

/// Find an obligation by exact ID, else by case-insensitive name
pub fn find_obligation<'a>(obligations: &'a [Obligation], name_or_id: &str) -> Option<&'a Obligation> {
    obligations
        .iter()
        .find(|o| o.id == name_or_id)
        .or_else(|| {
            obligations
                .iter()
                .find(|o| o.name.eq_ignore_ascii_case(name_or_id))
        })
}

/// Urgency band for an unsecured discount deadline
pub fn levy_band(status: &DiscountStatus) -> &'static str {
    if status.is_secured {
        "✅ Discount secured"
    } else if status.days_remaining <= 3 {
        "🔴 Pay now"
    } else if status.days_remaining <= 7 {
        "🟡 Due soon"
    } else {
        "🟢 On track"
    }
}

pub fn cmd_levy(session: &Session, name_or_id: &str) -> Result<()> {
    let levy = find_obligation(&session.ledger.obligations, name_or_id)
        .ok_or_else(|| anyhow::anyhow!("Obligation not found: {}", name_or_id))?;

    let status = discount_status(levy, &session.ledger.payments, session.today);

    if session.json {
        return print_json(&status);
    }

    println!();
    println!("🏠 {} ({:.2})", levy.name, status.levy_amount);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {}", levy_band(&status));
    match status.paid_date {
        Some(paid) => println!("   Paid on {}", paid.date_naive()),
        None => println!(
            "   {} days left to pay by {}",
            status.days_remaining, status.due_date
        ),
    }

    Ok(())
}
