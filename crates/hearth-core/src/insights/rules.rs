//! Built-in insight rules

use std::collections::BTreeSet;

use super::engine::InsightRule;
use super::types::{Insight, InsightKind, InsightThresholds};
use crate::analytics::SpendingAnalytics;
use crate::models::ExpenseCategory;

/// Flags a month with nothing to compare against
pub struct HistoryRule;

impl InsightRule for HistoryRule {
    fn name(&self) -> &'static str {
        "history"
    }

    fn evaluate(&self, analytics: &SpendingAnalytics, _: &InsightThresholds) -> Vec<Insight> {
        if analytics.has_previous_data {
            return vec![];
        }

        vec![Insight::new(
            InsightKind::Info,
            format!(
                "No spending recorded for {} yet. Trends will appear as data accumulates.",
                analytics.previous_month.month
            ),
        )]
    }
}

/// Overall month-over-month direction
pub struct OverallTrendRule;

impl InsightRule for OverallTrendRule {
    fn name(&self) -> &'static str {
        "overall_trend"
    }

    fn evaluate(
        &self,
        analytics: &SpendingAnalytics,
        thresholds: &InsightThresholds,
    ) -> Vec<Insight> {
        if !analytics.has_previous_data {
            return vec![];
        }

        let change = analytics.month_over_month_change;
        let insight = if change > thresholds.trend_change_pct {
            Insight::new(
                InsightKind::Increase,
                format!("Spending is up {:.1}% compared to last month", change),
            )
            .with_change(change)
        } else if change < -thresholds.trend_change_pct {
            Insight::new(
                InsightKind::Decrease,
                format!("Spending is down {:.1}% compared to last month", change.abs()),
            )
            .with_change(change)
        } else {
            Insight::new(InsightKind::Info, "Spending is stable compared to last month")
                .with_change(change)
        };

        vec![insight]
    }
}

/// A single category dominating the month's spend
pub struct CategoryShareRule;

impl InsightRule for CategoryShareRule {
    fn name(&self) -> &'static str {
        "category_share"
    }

    fn evaluate(
        &self,
        analytics: &SpendingAnalytics,
        thresholds: &InsightThresholds,
    ) -> Vec<Insight> {
        if analytics.current_month.total <= 0.0 {
            return vec![];
        }

        analytics
            .top_categories
            .iter()
            .filter(|share| share.amount > 0.0 && share.percentage >= thresholds.category_share_pct)
            .map(|share| {
                Insight::new(
                    InsightKind::Warning,
                    format!(
                        "{} makes up {:.0}% of this month's spending",
                        share.category.label(),
                        share.percentage
                    ),
                )
                .with_category(share.category)
                .with_change(share.percentage)
            })
            .collect()
    }
}

/// Categories that moved sharply since last month
pub struct CategoryChangeRule;

impl InsightRule for CategoryChangeRule {
    fn name(&self) -> &'static str {
        "category_change"
    }

    fn evaluate(
        &self,
        analytics: &SpendingAnalytics,
        thresholds: &InsightThresholds,
    ) -> Vec<Insight> {
        if !analytics.has_previous_data {
            return vec![];
        }

        let current = &analytics.current_month;
        let previous = &analytics.previous_month;
        let categories: BTreeSet<ExpenseCategory> = current
            .by_category
            .keys()
            .chain(previous.by_category.keys())
            .copied()
            .collect();

        // (absolute delta, insight)
        let mut candidates: Vec<(f64, Insight)> = Vec::new();

        for category in categories {
            let now = current.category_total(category);
            let before = previous.category_total(category);
            let label = category.label();

            if before <= 0.0 {
                if now >= thresholds.category_min_amount {
                    candidates.push((
                        now,
                        Insight::new(
                            InsightKind::Info,
                            format!("New spending on {} this month ({:.2})", label, now),
                        )
                        .with_category(category),
                    ));
                }
                continue;
            }

            if now.max(before) < thresholds.category_min_amount {
                continue;
            }

            let change = (now - before) / before * 100.0;
            if change.abs() < thresholds.category_change_pct {
                continue;
            }

            let (kind, direction) = if change > 0.0 {
                (InsightKind::Increase, "up")
            } else {
                (InsightKind::Decrease, "down")
            };

            candidates.push((
                (now - before).abs(),
                Insight::new(
                    kind,
                    format!(
                        "{} spending is {} {:.0}% from last month",
                        label,
                        direction,
                        change.abs()
                    ),
                )
                .with_category(category)
                .with_change(change),
            ));
        }

        candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        candidates
            .into_iter()
            .take(thresholds.max_category_insights)
            .map(|(_, insight)| insight)
            .collect()
    }
}
