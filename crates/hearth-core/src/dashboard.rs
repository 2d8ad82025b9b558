//! Dashboard report
//!
//! The primary entry point: one synchronous pass over a ledger snapshot that
//! produces every locally computed figure, followed by an optional async
//! narrative phase.
//!
//! ```rust,ignore
//! let report = Dashboard::build(&ledger, AnalyticsQuery::new(month), today, &config);
//! render(&report);
//! let narrative = report.narrate(client.as_ref(), config.ai_timeout).await;
//! ```

use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::ai::{summarize_or_fallback, AIClient, FinancialSnapshot, NarrativeOutcome};
use crate::ai::{SnapshotIncome, SnapshotObligation};
use crate::analytics::{spending_analytics_with, AnalyticsQuery, SpendingAnalytics};
use crate::config::EngineConfig;
use crate::finance::{
    budget_statuses, cash_flow, debt_plan, total_debt, upcoming_payments, BudgetStatus, CashFlow,
    DebtProjection, UpcomingPayment,
};
use crate::models::{Expense, Income, LedgerSnapshot, MonthKey, ValidationIssue};

/// Entry point for building dashboard reports
pub struct Dashboard;

impl Dashboard {
    /// Compute the full local report for `query.target_month`.
    ///
    /// Cash flow and budgets use the incomes and expenses dated in the target
    /// month. Upcoming payments and debt projections are relative to `today`.
    /// Data-quality problems are logged and returned, never rejected.
    pub fn build(
        ledger: &LedgerSnapshot,
        query: AnalyticsQuery,
        today: NaiveDate,
        config: &EngineConfig,
    ) -> DashboardReport {
        let month = query.target_month;

        let validation = ledger.validate();
        for issue in &validation {
            warn!(month = %month, "Ledger issue: {}", issue);
        }

        let generator = config.insight_generator();
        let analytics = spending_analytics_with(query, &ledger.expenses, today, &generator);

        let month_incomes: Vec<Income> = ledger
            .incomes
            .iter()
            .filter(|i| month.contains(i.date))
            .cloned()
            .collect();
        let month_expenses: Vec<Expense> = ledger
            .expenses
            .iter()
            .filter(|e| month.contains(e.date))
            .cloned()
            .collect();

        let cash_flow = cash_flow(
            ledger.monthly_income,
            &ledger.obligations,
            &month_incomes,
            &month_expenses,
        );
        let upcoming =
            upcoming_payments(&ledger.obligations, &ledger.payments, config.payday, today);
        let debts = debt_plan(&ledger.obligations, today);
        let total_debt = total_debt(&ledger.obligations);
        let budgets = budget_statuses(&ledger.budgets, &ledger.expenses, month);

        let snapshot = FinancialSnapshot {
            month,
            monthly_income: ledger.monthly_income,
            extra_income: cash_flow.total_income - ledger.monthly_income,
            total_income: cash_flow.total_income,
            obligations: ledger
                .obligations
                .iter()
                .filter(|o| o.is_active)
                .map(|o| SnapshotObligation {
                    name: o.name.clone(),
                    amount: o.amount,
                    category: o.category.clone(),
                    is_essential: o.is_uncompromised,
                    is_debt: o.is_debt(),
                })
                .collect(),
            expenses_by_category: analytics.current_month.by_category.clone(),
            total_expenses: cash_flow.total_expenses,
            incomes: month_incomes
                .iter()
                .map(|i| SnapshotIncome {
                    source: i.source.clone(),
                    amount: i.amount,
                })
                .collect(),
            budgets: budgets.clone(),
            burn_rate: cash_flow.burn_rate,
            variable_costs: cash_flow.variable_costs,
            free_cash_flow: cash_flow.free_cash_flow,
            savings_rate: cash_flow.savings_rate,
            month_over_month_change: analytics.month_over_month_change,
        };

        debug!(
            month = %month,
            expenses = analytics.current_month.transaction_count,
            upcoming = upcoming.len(),
            debts = debts.len(),
            issues = validation.len(),
            "Built dashboard report"
        );

        DashboardReport {
            month,
            analytics,
            cash_flow,
            upcoming,
            debts,
            total_debt,
            budgets,
            validation,
            snapshot,
        }
    }
}

/// Everything the dashboard shows for one month, computed locally
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub month: MonthKey,
    pub analytics: SpendingAnalytics,
    pub cash_flow: CashFlow,
    pub upcoming: Vec<UpcomingPayment>,
    /// Avalanche order
    pub debts: Vec<DebtProjection>,
    pub total_debt: f64,
    pub budgets: Vec<BudgetStatus>,
    pub validation: Vec<ValidationIssue>,
    #[serde(skip)]
    snapshot: FinancialSnapshot,
}

impl DashboardReport {
    /// Summarizer input built from this report's figures
    pub fn financial_snapshot(&self) -> &FinancialSnapshot {
        &self.snapshot
    }

    pub fn has_issues(&self) -> bool {
        !self.validation.is_empty()
    }

    /// Second phase: ask the summarizer for a narrative, falling back to the
    /// local summary. The report itself is already complete.
    pub async fn narrate(&self, client: Option<&AIClient>, timeout: Duration) -> NarrativeOutcome {
        summarize_or_fallback(client, &self.snapshot, timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::ai::{FallbackReason, MockBackend, MockFailure, NarrativeSource};
    use crate::finance::CashPosition;
    use crate::insights::InsightKind;
    use crate::models::{Budget, ExpenseCategory, Obligation, Payment};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn obligation(id: &str, amount: f64, essential: bool, day: u32) -> Obligation {
        Obligation {
            id: id.to_string(),
            name: id.to_string(),
            amount,
            is_uncompromised: essential,
            is_active: true,
            debit_order_date: day,
            interest_rate: None,
            total_balance: None,
            category: None,
        }
    }

    fn expense(amount: f64, category: ExpenseCategory, day: NaiveDate) -> Expense {
        Expense {
            id: None,
            name: "spend".to_string(),
            amount,
            category,
            date: day,
            person_id: None,
        }
    }

    fn ledger() -> LedgerSnapshot {
        let mut car = obligation("car", 2_500.0, false, 5);
        car.interest_rate = Some(11.0);
        car.total_balance = Some(45_000.0);

        LedgerSnapshot {
            monthly_income: 20_000.0,
            obligations: vec![obligation("rent", 8_000.0, true, 1), car],
            payments: vec![Payment {
                obligation_id: "rent".to_string(),
                amount: 8_000.0,
                expected_amount: None,
                adjustment_reason: None,
                paid_at: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
                month: MonthKey::new(2025, 3).unwrap(),
            }],
            expenses: vec![
                expense(1_200.0, ExpenseCategory::Groceries, date(2025, 3, 4)),
                expense(900.0, ExpenseCategory::Dining, date(2025, 2, 20)),
            ],
            incomes: vec![Income {
                amount: 500.0,
                source: "Freelance".to_string(),
                date: date(2025, 2, 10),
                is_recurring: false,
            }],
            budgets: vec![Budget {
                category: ExpenseCategory::Groceries,
                limit: 1_000.0,
                person_id: None,
            }],
            persons: vec![],
        }
    }

    fn build(ledger: &LedgerSnapshot) -> DashboardReport {
        let query = AnalyticsQuery::new(MonthKey::new(2025, 3).unwrap());
        Dashboard::build(ledger, query, date(2025, 3, 15), &EngineConfig::default())
    }

    #[test]
    fn test_cash_flow_uses_target_month_only() {
        let report = build(&ledger());

        // February income and expense are excluded
        assert_eq!(report.cash_flow.total_income, 20_000.0);
        assert_eq!(report.cash_flow.total_expenses, 1_200.0);
        assert_eq!(report.cash_flow.free_cash_flow, 8_300.0);
        assert_eq!(report.cash_flow.position, CashPosition::Surplus);
        assert_eq!(report.total_debt, 45_000.0);
    }

    #[test]
    fn test_report_sections() {
        let report = build(&ledger());

        assert_eq!(report.upcoming.len(), 2);
        // Both debit days have passed, so both roll to April
        assert_eq!(report.upcoming[0].obligation.id, "rent");
        assert!(report.upcoming[0].is_paid);
        assert!(!report.upcoming[1].is_paid);

        assert_eq!(report.debts.len(), 1);
        assert_eq!(report.debts[0].payoff.months(), Some(20));

        assert_eq!(report.budgets.len(), 1);
        assert!(report.budgets[0].over_budget);
        assert!(!report.has_issues());
    }

    #[test]
    fn test_financial_snapshot_matches_report() {
        let report = build(&ledger());
        let snapshot = report.financial_snapshot();

        assert_eq!(snapshot.month, report.month);
        assert_eq!(snapshot.free_cash_flow, report.cash_flow.free_cash_flow);
        assert_eq!(snapshot.extra_income, 0.0);
        assert!(snapshot.incomes.is_empty());
        assert_eq!(snapshot.obligations.len(), 2);
        assert!(snapshot.obligations[0].is_essential);
        assert!(snapshot.obligations[1].is_debt);
        assert_eq!(
            snapshot.expenses_by_category.get(&ExpenseCategory::Groceries),
            Some(&1_200.0)
        );
        assert!(snapshot.has_over_budget());
    }

    #[test]
    fn test_validation_issues_reported_not_rejected() {
        let mut ledger = ledger();
        ledger.obligations[0].debit_order_date = 0;
        ledger.payments[0].obligation_id = "ghost".to_string();

        let report = build(&ledger);
        assert!(report.validation.iter().any(|i| matches!(
            i,
            ValidationIssue::DebitDayOutOfRange { day: 0, .. }
        )));
        assert!(report
            .validation
            .iter()
            .any(|i| matches!(i, ValidationIssue::UnknownObligation { .. })));
        // Still computed
        assert_eq!(report.upcoming.len(), 2);
    }

    #[test]
    fn test_empty_ledger() {
        let report = build(&LedgerSnapshot::default());

        assert_eq!(report.cash_flow.free_cash_flow, 0.0);
        assert_eq!(report.cash_flow.savings_rate, 0.0);
        assert!(report.upcoming.is_empty());
        assert!(report.debts.is_empty());
        assert_eq!(report.analytics.insights.len(), 1);
        assert_eq!(report.analytics.insights[0].kind, InsightKind::Info);
    }

    #[test]
    fn test_report_json_is_stable() {
        let ledger = ledger();
        let first = serde_json::to_string(&build(&ledger)).unwrap();
        let second = serde_json::to_string(&build(&ledger)).unwrap();
        assert_eq!(first, second);
        assert!(!first.contains("\"snapshot\""));
    }

    #[tokio::test]
    async fn test_narrate() {
        let report = build(&ledger());

        let outcome = report
            .narrate(Some(&AIClient::mock()), Duration::from_secs(1))
            .await;
        assert!(!outcome.is_fallback());

        let failing = AIClient::Mock(MockBackend::failing(MockFailure::RateLimited));
        let outcome = report.narrate(Some(&failing), Duration::from_secs(1)).await;
        assert_eq!(
            outcome.source,
            NarrativeSource::Fallback {
                reason: FallbackReason::RateLimited
            }
        );
    }
}
