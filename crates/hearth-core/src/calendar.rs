//! Calendar helpers for billing cycles
//!
//! Month arithmetic used by the scheduler, the levy resolver and the
//! analytics aggregator. Debit days that do not exist in a month are clamped
//! to the month's last day (a debit order on the 31st lands on 30 April and
//! on 28 or 29 February).

use chrono::{Datelike, NaiveDate};

/// First day of the given month.
///
/// `month` must be in 1..=12; callers construct months through `MonthKey`
/// or from an existing `NaiveDate`, both of which guarantee that.
pub fn first_day_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("day 1 exists in every valid month")
}

/// Last day of the given month
pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    first_day_of_month(next_year, next_month)
        .pred_opt()
        .expect("a first-of-month always has a predecessor")
}

/// Number of days in the given month (28..=31)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    last_day_of_month(year, month).day()
}

/// Build a date in the given month, clamping `day` into the month.
///
/// Day 0 is treated as 1.
pub fn clamp_day(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).expect("day clamped into month range")
}

/// The (year, month) following the given one
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// The (year, month) preceding the given one
pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Signed number of days from `from` to `to`
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
