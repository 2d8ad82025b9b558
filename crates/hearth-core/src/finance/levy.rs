//! Early-payment discount status for a recurring levy
//!
//! The levy discount is secured once a payment is recorded for the current
//! billing month. Status is recomputed from payments on every call.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::calendar;
use crate::models::{MonthKey, Obligation, Payment};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscountStatus {
    pub is_secured: bool,
    pub levy_amount: f64,
    /// Earliest payment recorded for this month, when secured
    pub paid_date: Option<DateTime<Utc>>,
    /// Last day of the current month
    pub due_date: NaiveDate,
    /// Days left in the discount window; 0 once secured
    pub days_remaining: i64,
}

/// Resolve the discount window for `levy` as of `today`
pub fn discount_status(levy: &Obligation, payments: &[Payment], today: NaiveDate) -> DiscountStatus {
    let current = MonthKey::from_date(today);
    let due_date = current.last_day();

    let paid_date = payments
        .iter()
        .filter(|p| p.obligation_id == levy.id && p.month == current)
        .map(|p| p.paid_at)
        .min();

    match paid_date {
        Some(paid_at) => DiscountStatus {
            is_secured: true,
            levy_amount: levy.amount,
            paid_date: Some(paid_at),
            due_date,
            days_remaining: 0,
        },
        None => DiscountStatus {
            is_secured: false,
            levy_amount: levy.amount,
            paid_date: None,
            due_date,
            days_remaining: calendar::days_between(today, due_date).max(0),
        },
    }
}
