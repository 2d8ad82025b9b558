//! Domain models for Hearth
//!
//! Ledger entries (obligations, payments, expenses, incomes, budgets) arrive
//! as a `LedgerSnapshot` supplied by the caller. Everything derived from them
//! lives next to the calculation that produces it.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::error::{Error, Result};

/// A recurring financial commitment (bill or debt)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obligation {
    pub id: String,
    pub name: String,
    /// Recurring amount; for debts this is the payment toward the balance
    pub amount: f64,
    /// Fixed/essential cost (true) vs variable/discretionary (false)
    pub is_uncompromised: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Day of month the debit order runs (1-31)
    pub debit_order_date: u32,
    /// Annual interest rate in percent, debts only
    #[serde(default)]
    pub interest_rate: Option<f64>,
    /// Outstanding principal, debts only
    #[serde(default)]
    pub total_balance: Option<f64>,
    /// Free-form label (e.g. "Housing", "Insurance")
    #[serde(default)]
    pub category: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Obligation {
    /// An obligation with a balance is a debt instrument
    pub fn is_debt(&self) -> bool {
        self.total_balance.is_some()
    }
}

/// A recorded settlement against an obligation for one billing month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub obligation_id: String,
    pub amount: f64,
    #[serde(default)]
    pub expected_amount: Option<f64>,
    #[serde(default)]
    pub adjustment_reason: Option<String>,
    pub paid_at: DateTime<Utc>,
    /// Billing cycle this payment satisfies
    pub month: MonthKey,
}

/// Expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseCategory {
    Groceries,
    Dining,
    Transport,
    Utilities,
    Housing,
    Health,
    Entertainment,
    Shopping,
    Education,
    Travel,
    PersonalCare,
    Gifts,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groceries => "GROCERIES",
            Self::Dining => "DINING",
            Self::Transport => "TRANSPORT",
            Self::Utilities => "UTILITIES",
            Self::Housing => "HOUSING",
            Self::Health => "HEALTH",
            Self::Entertainment => "ENTERTAINMENT",
            Self::Shopping => "SHOPPING",
            Self::Education => "EDUCATION",
            Self::Travel => "TRAVEL",
            Self::PersonalCare => "PERSONAL_CARE",
            Self::Gifts => "GIFTS",
            Self::Other => "OTHER",
        }
    }

    /// Human-readable label for messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Groceries => "Groceries",
            Self::Dining => "Dining",
            Self::Transport => "Transport",
            Self::Utilities => "Utilities",
            Self::Housing => "Housing",
            Self::Health => "Health",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::PersonalCare => "Personal care",
            Self::Gifts => "Gifts",
            Self::Other => "Other",
        }
    }

    pub fn all() -> &'static [ExpenseCategory] {
        &[
            Self::Groceries,
            Self::Dining,
            Self::Transport,
            Self::Utilities,
            Self::Housing,
            Self::Health,
            Self::Entertainment,
            Self::Shopping,
            Self::Education,
            Self::Travel,
            Self::PersonalCare,
            Self::Gifts,
            Self::Other,
        ]
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace([' ', '-'], "_");
        Self::all()
            .iter()
            .find(|c| c.as_str() == normalized)
            .copied()
            .ok_or_else(|| format!("Unknown expense category: {}", s))
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ad-hoc discretionary spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default)]
    pub id: Option<String>,
    /// Free-text description ("Woolworths", "Uber to airport")
    #[serde(default)]
    pub name: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
    /// Household member the spend is attributed to
    #[serde(default)]
    pub person_id: Option<String>,
}

/// An ad-hoc non-salary inflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub amount: f64,
    pub source: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_recurring: bool,
}

/// Monthly spending limit for a category, optionally per household member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: ExpenseCategory,
    pub limit: f64,
    #[serde(default)]
    pub person_id: Option<String>,
}

/// A household member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
}

/// A calendar month, written "YYYY-MM"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || !(1..=9999).contains(&year) {
            return Err(Error::InvalidMonth(format!("{}-{}", year, month)));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn previous(&self) -> Self {
        let (year, month) = calendar::prev_month(self.year, self.month);
        Self { year, month }
    }

    pub fn next(&self) -> Self {
        let (year, month) = calendar::next_month(self.year, self.month);
        Self { year, month }
    }

    /// Step back `n` months
    pub fn minus_months(&self, n: u32) -> Self {
        Self::from_index(self.index() - i64::from(n))
    }

    /// Step forward `n` months
    pub fn plus_months(&self, n: u32) -> Self {
        Self::from_index(self.index() + i64::from(n))
    }

    /// Months since year 0
    fn index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    fn from_index(index: i64) -> Self {
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        calendar::first_day_of_month(self.year, self.month)
    }

    pub fn last_day(&self) -> NaiveDate {
        calendar::last_day_of_month(self.year, self.month)
    }

    pub fn days_in_month(&self) -> u32 {
        calendar::days_in_month(self.year, self.month)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| Error::InvalidMonth(s.to_string()))?;

        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !digits(year) || !digits(month) {
            return Err(Error::InvalidMonth(s.to_string()));
        }

        let year: i32 = year
            .parse()
            .map_err(|_| Error::InvalidMonth(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| Error::InvalidMonth(s.to_string()))?;

        Self::new(year, month).map_err(|_| Error::InvalidMonth(s.to_string()))
    }
}

impl TryFrom<String> for MonthKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// Everything the engine needs for one user, captured at one point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Salary per month
    #[serde(default)]
    pub monthly_income: f64,
    #[serde(default)]
    pub obligations: Vec<Obligation>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub incomes: Vec<Income>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub persons: Vec<Person>,
}

/// A data-quality problem found in a ledger snapshot
///
/// Calculations never reject these; they are surfaced so callers can fix
/// the underlying records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ValidationIssue {
    NegativeAmount { record: String, amount: f64 },
    DebitDayOutOfRange { obligation_id: String, day: u32 },
    NegativeBalance { obligation_id: String, balance: f64 },
    NegativeInterestRate { obligation_id: String, rate: f64 },
    UnknownObligation { obligation_id: String, month: MonthKey },
    NonFiniteValue { record: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount { record, amount } => {
                write!(f, "{} has a negative amount ({:.2})", record, amount)
            }
            Self::DebitDayOutOfRange { obligation_id, day } => write!(
                f,
                "obligation {} has debit day {} outside 1-31",
                obligation_id, day
            ),
            Self::NegativeBalance {
                obligation_id,
                balance,
            } => write!(
                f,
                "obligation {} has a negative balance ({:.2})",
                obligation_id, balance
            ),
            Self::NegativeInterestRate {
                obligation_id,
                rate,
            } => write!(
                f,
                "obligation {} has a negative interest rate ({:.2}%)",
                obligation_id, rate
            ),
            Self::UnknownObligation {
                obligation_id,
                month,
            } => write!(
                f,
                "payment for {} references unknown obligation {}",
                month, obligation_id
            ),
            Self::NonFiniteValue { record } => write!(f, "{} contains a non-finite number", record),
        }
    }
}

impl LedgerSnapshot {
    /// Report data-quality problems without modifying or rejecting anything
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if !self.monthly_income.is_finite() {
            issues.push(ValidationIssue::NonFiniteValue {
                record: "monthly income".to_string(),
            });
        }

        for ob in &self.obligations {
            let record = format!("obligation {}", ob.id);
            check_amount(&mut issues, &record, ob.amount);

            if !(1..=31).contains(&ob.debit_order_date) {
                issues.push(ValidationIssue::DebitDayOutOfRange {
                    obligation_id: ob.id.clone(),
                    day: ob.debit_order_date,
                });
            }
            if let Some(balance) = ob.total_balance {
                if !balance.is_finite() {
                    issues.push(ValidationIssue::NonFiniteValue {
                        record: record.clone(),
                    });
                } else if balance < 0.0 {
                    issues.push(ValidationIssue::NegativeBalance {
                        obligation_id: ob.id.clone(),
                        balance,
                    });
                }
            }
            if let Some(rate) = ob.interest_rate {
                if !rate.is_finite() {
                    issues.push(ValidationIssue::NonFiniteValue { record });
                } else if rate < 0.0 {
                    issues.push(ValidationIssue::NegativeInterestRate {
                        obligation_id: ob.id.clone(),
                        rate,
                    });
                }
            }
        }

        let known: HashSet<&str> = self.obligations.iter().map(|o| o.id.as_str()).collect();
        for payment in &self.payments {
            check_amount(
                &mut issues,
                &format!("payment for {}", payment.obligation_id),
                payment.amount,
            );
            if !known.contains(payment.obligation_id.as_str()) {
                issues.push(ValidationIssue::UnknownObligation {
                    obligation_id: payment.obligation_id.clone(),
                    month: payment.month,
                });
            }
        }

        for expense in &self.expenses {
            let record = match &expense.id {
                Some(id) => format!("expense {}", id),
                None => format!("expense '{}' on {}", expense.name, expense.date),
            };
            check_amount(&mut issues, &record, expense.amount);
        }

        for income in &self.incomes {
            check_amount(
                &mut issues,
                &format!("income '{}' on {}", income.source, income.date),
                income.amount,
            );
        }

        issues
    }
}

fn check_amount(issues: &mut Vec<ValidationIssue>, record: &str, amount: f64) {
    if !amount.is_finite() {
        issues.push(ValidationIssue::NonFiniteValue {
            record: record.to_string(),
        });
    } else if amount < 0.0 {
        issues.push(ValidationIssue::NegativeAmount {
            record: record.to_string(),
            amount,
        });
    }
}
