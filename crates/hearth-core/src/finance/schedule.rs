//! Payment cycle scheduling
//!
//! Each active obligation is due on its debit day in the current month if
//! that day hasn't passed yet, otherwise in the following month. A debit day
//! past the end of the due month lands on the month's last day.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::calendar;
use crate::models::{MonthKey, Obligation, Payment};

/// Next due date for an obligation relative to `today`
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingPayment {
    pub obligation: Obligation,
    pub due_date: NaiveDate,
    /// Signed; negative means overdue
    pub days_until: i64,
    /// A payment is recorded against today's billing month
    pub is_paid: bool,
}

/// Due date for a debit order on `debit_day`, seen from `today`.
///
/// `debit_day` must be in 1..=31.
pub fn due_date_for(debit_day: u32, today: NaiveDate) -> NaiveDate {
    let (year, month) = if debit_day >= today.day() {
        (today.year(), today.month())
    } else {
        calendar::next_month(today.year(), today.month())
    };

    calendar::clamp_day(year, month, debit_day)
}

/// Order soonest-due first; overdue entries (negative `days_until`) come
/// before future ones. Stable on ties.
pub fn sort_by_due(payments: &mut [UpcomingPayment]) {
    payments.sort_by_key(|p| p.days_until);
}

/// Upcoming payments for all active obligations, soonest first.
///
/// `payday` stands in for any obligation whose debit day is outside 1..=31.
pub fn upcoming_payments(
    obligations: &[Obligation],
    payments: &[Payment],
    payday: u32,
    today: NaiveDate,
) -> Vec<UpcomingPayment> {
    let current = MonthKey::from_date(today);
    let paid: HashSet<&str> = payments
        .iter()
        .filter(|p| p.month == current)
        .map(|p| p.obligation_id.as_str())
        .collect();

    let payday = payday.clamp(1, 31);

    let mut upcoming: Vec<UpcomingPayment> = obligations
        .iter()
        .filter(|o| o.is_active)
        .map(|ob| {
            let debit_day = if (1..=31).contains(&ob.debit_order_date) {
                ob.debit_order_date
            } else {
                debug!(
                    obligation = %ob.id,
                    day = ob.debit_order_date,
                    payday,
                    "Debit day out of range, using payday"
                );
                payday
            };

            let due_date = due_date_for(debit_day, today);
            UpcomingPayment {
                obligation: ob.clone(),
                due_date,
                days_until: calendar::days_between(today, due_date),
                is_paid: paid.contains(ob.id.as_str()),
            }
        })
        .collect();

    sort_by_due(&mut upcoming);
    upcoming
}
