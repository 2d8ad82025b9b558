//! Monthly spending aggregation

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use super::types::{
    AnalyticsQuery, CategoryShare, MonthSummary, MonthlyTotal, SpendingAnalytics,
};
use crate::insights::InsightGenerator;
use crate::models::{Expense, ExpenseCategory, MonthKey};

/// Analyze spending for the query's target month with the built-in
/// insight thresholds
pub fn spending_analytics(
    query: AnalyticsQuery,
    expenses: &[Expense],
    today: NaiveDate,
) -> SpendingAnalytics {
    spending_analytics_with(query, expenses, today, &InsightGenerator::default())
}

/// Analyze spending for the query's target month, generating insights with
/// the given generator
pub fn spending_analytics_with(
    query: AnalyticsQuery,
    expenses: &[Expense],
    today: NaiveDate,
    generator: &InsightGenerator,
) -> SpendingAnalytics {
    let by_month = group_by_month(expenses);
    let target = query.target_month;

    let current_month = summarize(target, &by_month);
    let previous_month = summarize(target.previous(), &by_month);

    // A month that nets out to refunds is no baseline
    let has_previous_data = previous_month.total > 0.0;
    let month_over_month_change = percent_change(current_month.total, previous_month.total);

    let lookback = query.effective_lookback();
    let oldest = target.minus_months(lookback - 1);
    let history = (0..lookback)
        .map(|offset| {
            let summary = summarize(oldest.plus_months(offset), &by_month);
            MonthlyTotal {
                month: summary.month,
                total: summary.total,
                by_category: summary.by_category,
            }
        })
        .collect();

    let elapsed_days = elapsed_days(target, today);
    let avg_daily_spending = if elapsed_days == 0 {
        0.0
    } else {
        current_month.total / elapsed_days as f64
    };

    let top_categories = rank_categories(target, &current_month, &by_month);

    let mut analytics = SpendingAnalytics {
        current_month,
        previous_month,
        month_over_month_change,
        has_previous_data,
        history,
        avg_daily_spending,
        elapsed_days,
        top_categories,
        insights: Vec::new(),
    };

    analytics.insights = generator.generate(&analytics);
    analytics
}

/// Percent change from `previous` to `current`; 0 when `previous` is not
/// positive
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous <= 0.0 {
        0.0
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Days of `month` that count toward its daily average as of `today`.
///
/// The current month counts up to and including today, past months count
/// in full and future months have no elapsed days.
pub fn elapsed_days(month: MonthKey, today: NaiveDate) -> u32 {
    let current = MonthKey::from_date(today);
    if month == current {
        today.day()
    } else if month < current {
        month.days_in_month()
    } else {
        0
    }
}

fn group_by_month(expenses: &[Expense]) -> BTreeMap<MonthKey, Vec<&Expense>> {
    let mut by_month: BTreeMap<MonthKey, Vec<&Expense>> = BTreeMap::new();
    for expense in expenses {
        by_month
            .entry(MonthKey::from_date(expense.date))
            .or_default()
            .push(expense);
    }
    by_month
}

fn summarize(month: MonthKey, by_month: &BTreeMap<MonthKey, Vec<&Expense>>) -> MonthSummary {
    let Some(expenses) = by_month.get(&month) else {
        return MonthSummary::empty(month);
    };

    let mut by_category: BTreeMap<ExpenseCategory, f64> = BTreeMap::new();
    for expense in expenses {
        *by_category.entry(expense.category).or_insert(0.0) += expense.amount;
    }

    MonthSummary {
        month,
        total: expenses.iter().map(|e| e.amount).sum(),
        by_category,
        transaction_count: expenses.len(),
    }
}

fn rank_categories(
    month: MonthKey,
    summary: &MonthSummary,
    by_month: &BTreeMap<MonthKey, Vec<&Expense>>,
) -> Vec<CategoryShare> {
    let mut counts: BTreeMap<ExpenseCategory, usize> = BTreeMap::new();
    for expense in by_month.get(&month).into_iter().flatten() {
        *counts.entry(expense.category).or_insert(0) += 1;
    }

    let mut shares: Vec<CategoryShare> = summary
        .by_category
        .iter()
        .map(|(&category, &amount)| CategoryShare {
            category,
            amount,
            percentage: if summary.total == 0.0 {
                0.0
            } else {
                amount / summary.total * 100.0
            },
            transaction_count: counts.get(&category).copied().unwrap_or(0),
        })
        .collect();

    // BTreeMap iteration is in category order, so the stable sort breaks
    // ties by category
    shares.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::MAX_LOOKBACK_MONTHS;
    use crate::insights::InsightKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn expense(amount: f64, category: ExpenseCategory, on: NaiveDate) -> Expense {
        Expense {
            id: None,
            name: String::new(),
            amount,
            category,
            date: on,
            person_id: None,
        }
    }

    #[test]
    fn test_empty_ledger_is_zero_state() {
        let today = date(2025, 3, 15);
        let analytics = spending_analytics(AnalyticsQuery::new(month("2025-03")), &[], today);

        assert_eq!(analytics.current_month.total, 0.0);
        assert_eq!(analytics.current_month.transaction_count, 0);
        assert_eq!(analytics.month_over_month_change, 0.0);
        assert!(!analytics.has_previous_data);
        assert_eq!(analytics.history.len(), 6);
        assert!(analytics.history.iter().all(|h| h.total == 0.0));
        assert_eq!(analytics.avg_daily_spending, 0.0);
        assert!(analytics.top_categories.is_empty());

        assert_eq!(analytics.insights.len(), 1);
        assert_eq!(analytics.insights[0].kind, InsightKind::Info);
    }

    #[test]
    fn test_month_over_month_without_previous_is_zero() {
        let today = date(2025, 3, 15);
        let expenses = vec![expense(500.0, ExpenseCategory::Groceries, date(2025, 3, 2))];

        let analytics =
            spending_analytics(AnalyticsQuery::new(month("2025-03")), &expenses, today);
        assert_eq!(analytics.current_month.total, 500.0);
        assert_eq!(analytics.previous_month.total, 0.0);
        assert_eq!(analytics.month_over_month_change, 0.0);
        assert!(analytics.month_over_month_change.is_finite());
        assert!(!analytics.has_previous_data);
    }

    #[test]
    fn test_current_and_previous_breakdown() {
        let today = date(2025, 3, 10);
        let expenses = vec![
            expense(300.0, ExpenseCategory::Groceries, date(2025, 3, 1)),
            expense(200.0, ExpenseCategory::Dining, date(2025, 3, 4)),
            expense(100.0, ExpenseCategory::Groceries, date(2025, 3, 9)),
            expense(400.0, ExpenseCategory::Groceries, date(2025, 2, 12)),
            expense(999.0, ExpenseCategory::Travel, date(2024, 12, 20)),
        ];

        let analytics =
            spending_analytics(AnalyticsQuery::new(month("2025-03")), &expenses, today);

        assert_eq!(analytics.current_month.total, 600.0);
        assert_eq!(analytics.current_month.transaction_count, 3);
        assert_eq!(
            analytics.current_month.category_total(ExpenseCategory::Groceries),
            400.0
        );
        assert_eq!(analytics.previous_month.total, 400.0);
        assert_eq!(analytics.month_over_month_change, 50.0);
        assert!(analytics.has_previous_data);
    }

    #[test]
    fn test_history_window_oldest_first() {
        let today = date(2025, 3, 10);
        let expenses = vec![
            expense(50.0, ExpenseCategory::Dining, date(2025, 1, 5)),
            expense(70.0, ExpenseCategory::Dining, date(2025, 3, 5)),
        ];

        let query = AnalyticsQuery::new(month("2025-03")).with_lookback(3);
        let analytics = spending_analytics(query, &expenses, today);

        let months: Vec<String> = analytics.history.iter().map(|h| h.month.to_string()).collect();
        assert_eq!(months, vec!["2025-01", "2025-02", "2025-03"]);

        let totals: Vec<f64> = analytics.history.iter().map(|h| h.total).collect();
        assert_eq!(totals, vec![50.0, 0.0, 70.0]);
    }

    #[test]
    fn test_zero_lookback_still_includes_target() {
        let query = AnalyticsQuery::new(month("2025-03")).with_lookback(0);
        let analytics = spending_analytics(query, &[], date(2025, 3, 10));
        assert_eq!(analytics.history.len(), 1);
        assert_eq!(analytics.history[0].month, month("2025-03"));
    }

    #[test]
    fn test_lookback_is_capped() {
        let target = month("2025-03");
        let expenses = vec![expense(80.0, ExpenseCategory::Dining, date(2015, 4, 9))];
        let query = AnalyticsQuery::new(target).with_lookback(100_000);
        assert_eq!(query.effective_lookback(), MAX_LOOKBACK_MONTHS);

        let analytics = spending_analytics(query, &expenses, date(2025, 3, 10));
        assert_eq!(analytics.history.len(), MAX_LOOKBACK_MONTHS as usize);
        assert_eq!(analytics.history[0].month, month("2015-04"));
        assert_eq!(analytics.history[0].total, 80.0);
        assert_eq!(analytics.history.last().map(|h| h.month), Some(target));

        let json = serde_json::to_string(&analytics).unwrap();
        let back: SpendingAnalytics = serde_json::from_str(&json).unwrap();
        assert_eq!(back.history, analytics.history);
    }

    #[test]
    fn test_negative_previous_month_is_not_a_baseline() {
        let today = date(2025, 3, 20);
        let expenses = vec![
            expense(-100.0, ExpenseCategory::Shopping, date(2025, 2, 10)),
            expense(50.0, ExpenseCategory::Shopping, date(2025, 3, 5)),
        ];

        let analytics =
            spending_analytics(AnalyticsQuery::new(month("2025-03")), &expenses, today);
        assert_eq!(analytics.previous_month.total, -100.0);
        assert!(!analytics.has_previous_data);
        assert_eq!(analytics.month_over_month_change, 0.0);
        assert!(analytics
            .insights
            .iter()
            .all(|i| i.kind != InsightKind::Increase && i.kind != InsightKind::Decrease));
    }

    #[test]
    fn test_average_daily_spending_elapsed_days() {
        let expenses = vec![
            expense(300.0, ExpenseCategory::Groceries, date(2025, 2, 3)),
            expense(300.0, ExpenseCategory::Groceries, date(2025, 3, 3)),
        ];

        // Current month: days elapsed so far
        let analytics = spending_analytics(
            AnalyticsQuery::new(month("2025-03")),
            &expenses,
            date(2025, 3, 10),
        );
        assert_eq!(analytics.elapsed_days, 10);
        assert_eq!(analytics.avg_daily_spending, 30.0);

        // Past month: full month
        let analytics = spending_analytics(
            AnalyticsQuery::new(month("2025-02")),
            &expenses,
            date(2025, 3, 10),
        );
        assert_eq!(analytics.elapsed_days, 28);
        assert!((analytics.avg_daily_spending - 300.0 / 28.0).abs() < 1e-9);

        // Future month: nothing elapsed
        let analytics = spending_analytics(
            AnalyticsQuery::new(month("2025-04")),
            &expenses,
            date(2025, 3, 10),
        );
        assert_eq!(analytics.elapsed_days, 0);
        assert_eq!(analytics.avg_daily_spending, 0.0);
    }

    #[test]
    fn test_top_categories_ranked_with_shares() {
        let today = date(2025, 3, 20);
        let expenses = vec![
            expense(250.0, ExpenseCategory::Dining, date(2025, 3, 1)),
            expense(500.0, ExpenseCategory::Groceries, date(2025, 3, 2)),
            expense(250.0, ExpenseCategory::Transport, date(2025, 3, 3)),
            expense(0.0, ExpenseCategory::Gifts, date(2025, 3, 3)),
            expense(250.0, ExpenseCategory::Dining, date(2025, 3, 4)),
        ];

        let analytics =
            spending_analytics(AnalyticsQuery::new(month("2025-03")), &expenses, today);
        let top = &analytics.top_categories;

        assert_eq!(top.len(), 4);
        // Dining and Groceries tie at 500; Groceries comes first in category order
        assert_eq!(top[0].category, ExpenseCategory::Groceries);
        assert_eq!(top[1].category, ExpenseCategory::Dining);
        assert_eq!(top[1].transaction_count, 2);
        assert_eq!(top[2].category, ExpenseCategory::Transport);
        assert_eq!(top[2].percentage, 20.0);
        assert_eq!(top[3].category, ExpenseCategory::Gifts);

        let total_pct: f64 = top.iter().map(|c| c.percentage).sum();
        assert!((total_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_change_guard() {
        assert_eq!(percent_change(500.0, 0.0), 0.0);
        assert_eq!(percent_change(50.0, -100.0), 0.0);
        assert_eq!(percent_change(150.0, 100.0), 50.0);
        assert_eq!(percent_change(50.0, 100.0), -50.0);
    }
}
