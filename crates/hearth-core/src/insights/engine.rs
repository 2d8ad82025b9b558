//! Insight generator - runs registered rules over an analytics result

use super::rules::{CategoryChangeRule, CategoryShareRule, HistoryRule, OverallTrendRule};
use super::types::{Insight, InsightThresholds};
use crate::analytics::SpendingAnalytics;

/// A pure rule over the aggregated month
pub trait InsightRule: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Produce insights for this month; an empty vec means nothing notable
    fn evaluate(&self, analytics: &SpendingAnalytics, thresholds: &InsightThresholds)
        -> Vec<Insight>;
}

/// Runs rules in registration order and concatenates their output
pub struct InsightGenerator {
    rules: Vec<Box<dyn InsightRule>>,
    thresholds: InsightThresholds,
}

impl Default for InsightGenerator {
    fn default() -> Self {
        Self::new(InsightThresholds::default())
    }
}

impl InsightGenerator {
    /// Create a generator with the built-in rules
    pub fn new(thresholds: InsightThresholds) -> Self {
        let mut generator = Self::empty(thresholds);

        // Register built-in rules
        generator.register(Box::new(HistoryRule));
        generator.register(Box::new(OverallTrendRule));
        generator.register(Box::new(CategoryShareRule));
        generator.register(Box::new(CategoryChangeRule));

        generator
    }

    /// Create a generator with no rules registered
    pub fn empty(thresholds: InsightThresholds) -> Self {
        Self {
            rules: vec![],
            thresholds,
        }
    }

    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    pub fn thresholds(&self) -> &InsightThresholds {
        &self.thresholds
    }

    /// Run every rule and collect insights in rule order
    pub fn generate(&self, analytics: &SpendingAnalytics) -> Vec<Insight> {
        let mut insights = vec![];

        for rule in &self.rules {
            let found = rule.evaluate(analytics, &self.thresholds);
            tracing::debug!(
                rule = rule.name(),
                count = found.len(),
                month = %analytics.current_month.month,
                "Insight rule evaluated"
            );
            insights.extend(found);
        }

        insights
    }

    /// Names of registered rules, in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{spending_analytics_with, AnalyticsQuery};
    use crate::insights::{InsightKind, MAX_CATEGORY_INSIGHTS};
    use crate::models::{Expense, ExpenseCategory};
    use chrono::NaiveDate;

    fn expense(amount: f64, category: ExpenseCategory, y: i32, m: u32, d: u32) -> Expense {
        Expense {
            id: None,
            name: String::new(),
            amount,
            category,
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            person_id: None,
        }
    }

    fn analyze(expenses: &[Expense], generator: &InsightGenerator) -> Vec<Insight> {
        let query = AnalyticsQuery::new("2025-03".parse().unwrap());
        let today = NaiveDate::from_ymd_opt(2025, 3, 28).unwrap();
        spending_analytics_with(query, expenses, today, generator).insights
    }

    #[test]
    fn test_builtin_rule_order() {
        let generator = InsightGenerator::default();
        assert_eq!(
            generator.rule_names(),
            vec!["history", "overall_trend", "category_share", "category_change"]
        );
    }

    #[test]
    fn test_empty_ledger_yields_single_info() {
        let insights = analyze(&[], &InsightGenerator::default());
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Info);
        assert!(insights[0].message.contains("accumulates"));
    }

    #[test]
    fn test_overall_increase_and_decrease() {
        let generator = InsightGenerator::default();

        // Split across categories so no single category dominates
        let up = vec![
            expense(500.0, ExpenseCategory::Groceries, 2025, 2, 5),
            expense(500.0, ExpenseCategory::Transport, 2025, 2, 5),
            expense(600.0, ExpenseCategory::Groceries, 2025, 3, 5),
            expense(600.0, ExpenseCategory::Transport, 2025, 3, 5),
        ];
        let insights = analyze(&up, &generator);
        assert_eq!(insights[0].kind, InsightKind::Increase);
        assert!((insights[0].change.unwrap() - 20.0).abs() < 1e-9);
        assert!(insights[0].message.contains("20.0%"));

        let down = vec![
            expense(1_000.0, ExpenseCategory::Groceries, 2025, 2, 5),
            expense(800.0, ExpenseCategory::Groceries, 2025, 3, 5),
        ];
        let insights = analyze(&down, &generator);
        assert_eq!(insights[0].kind, InsightKind::Decrease);
    }

    #[test]
    fn test_stable_within_threshold() {
        let expenses = vec![
            expense(1_000.0, ExpenseCategory::Groceries, 2025, 2, 5),
            expense(1_050.0, ExpenseCategory::Groceries, 2025, 3, 5),
        ];
        let insights = analyze(&expenses, &InsightGenerator::default());
        assert_eq!(insights[0].kind, InsightKind::Info);
        assert!(insights[0].message.contains("stable"));
    }

    #[test]
    fn test_dominant_category_warning() {
        let expenses = vec![
            expense(100.0, ExpenseCategory::Groceries, 2025, 2, 5),
            expense(600.0, ExpenseCategory::Dining, 2025, 3, 5),
            expense(400.0, ExpenseCategory::Groceries, 2025, 3, 6),
        ];
        let insights = analyze(&expenses, &InsightGenerator::default());

        let warnings: Vec<&Insight> = insights
            .iter()
            .filter(|i| i.kind == InsightKind::Warning)
            .collect();
        // Dining is 60%, Groceries 40%: both at or above the threshold
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].category, Some(ExpenseCategory::Dining));
    }

    #[test]
    fn test_category_change_capped_and_ranked() {
        let mut expenses = vec![];
        for (category, before, now) in [
            (ExpenseCategory::Groceries, 200.0, 1_000.0),
            (ExpenseCategory::Dining, 400.0, 100.0),
            (ExpenseCategory::Transport, 200.0, 500.0),
            (ExpenseCategory::Health, 100.0, 200.0),
            (ExpenseCategory::Utilities, 1_000.0, 1_010.0),
        ] {
            expenses.push(expense(before, category, 2025, 2, 10));
            expenses.push(expense(now, category, 2025, 3, 10));
        }
        expenses.push(expense(450.0, ExpenseCategory::Travel, 2025, 3, 11));

        let insights = analyze(&expenses, &InsightGenerator::default());
        let category_insights: Vec<&Insight> = insights
            .iter()
            .filter(|i| i.category.is_some() && i.kind != InsightKind::Warning)
            .collect();

        assert_eq!(category_insights.len(), MAX_CATEGORY_INSIGHTS);
        assert_eq!(category_insights[0].category, Some(ExpenseCategory::Groceries));
        assert_eq!(category_insights[0].kind, InsightKind::Increase);
        assert_eq!(category_insights[1].category, Some(ExpenseCategory::Travel));
        assert_eq!(category_insights[1].kind, InsightKind::Info);
        // Dining and Transport both moved by 300; Dining sorts first
        assert_eq!(category_insights[2].category, Some(ExpenseCategory::Dining));
        assert_eq!(category_insights[2].kind, InsightKind::Decrease);
    }

    #[test]
    fn test_small_categories_ignored() {
        let expenses = vec![
            expense(20.0, ExpenseCategory::Gifts, 2025, 2, 5),
            expense(80.0, ExpenseCategory::Gifts, 2025, 3, 5),
            expense(1_000.0, ExpenseCategory::Housing, 2025, 2, 5),
            expense(1_000.0, ExpenseCategory::Housing, 2025, 3, 5),
        ];
        let insights = analyze(&expenses, &InsightGenerator::default());
        assert!(!insights
            .iter()
            .any(|i| i.category == Some(ExpenseCategory::Gifts)));
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = InsightThresholds {
            trend_change_pct: 1.0,
            ..Default::default()
        };
        let expenses = vec![
            expense(1_000.0, ExpenseCategory::Groceries, 2025, 2, 5),
            expense(1_050.0, ExpenseCategory::Groceries, 2025, 3, 5),
        ];
        let insights = analyze(&expenses, &InsightGenerator::new(thresholds));
        assert_eq!(insights[0].kind, InsightKind::Increase);
    }

    struct AlwaysRule;

    impl InsightRule for AlwaysRule {
        fn name(&self) -> &'static str {
            "always"
        }

        fn evaluate(&self, _: &SpendingAnalytics, _: &InsightThresholds) -> Vec<Insight> {
            vec![Insight::new(InsightKind::Info, "custom")]
        }
    }

    #[test]
    fn test_register_custom_rule() {
        let mut generator = InsightGenerator::empty(InsightThresholds::default());
        generator.register(Box::new(AlwaysRule));

        let insights = analyze(&[], &generator);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].message, "custom");
    }
}
