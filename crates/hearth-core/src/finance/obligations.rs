//! Obligation classification and burn rate

use serde::Serialize;

use crate::models::Obligation;

/// Active obligations split into essential and variable buckets
#[derive(Debug, Clone, Default, Serialize)]
pub struct ObligationBuckets<'a> {
    /// Uncompromised (fixed) costs
    pub essential: Vec<&'a Obligation>,
    /// Discretionary costs
    pub variable: Vec<&'a Obligation>,
}

/// Partition active obligations, keeping input order within each bucket
pub fn classify(obligations: &[Obligation]) -> ObligationBuckets<'_> {
    let (essential, variable) = obligations
        .iter()
        .filter(|o| o.is_active)
        .partition(|o| o.is_uncompromised);

    ObligationBuckets {
        essential,
        variable,
    }
}

/// Total recurring essential spend: active, uncompromised obligations
pub fn burn_rate(obligations: &[Obligation]) -> f64 {
    obligations
        .iter()
        .filter(|o| o.is_active && o.is_uncompromised)
        .map(|o| o.amount)
        .sum()
}

/// Total recurring discretionary spend: active, variable obligations
pub fn variable_costs(obligations: &[Obligation]) -> f64 {
    obligations
        .iter()
        .filter(|o| o.is_active && !o.is_uncompromised)
        .map(|o| o.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obligation(id: &str, amount: f64, essential: bool, active: bool) -> Obligation {
        Obligation {
            id: id.to_string(),
            name: id.to_string(),
            amount,
            is_uncompromised: essential,
            is_active: active,
            debit_order_date: 1,
            interest_rate: None,
            total_balance: None,
            category: None,
        }
    }

    #[test]
    fn test_empty_input_is_zero() {
        assert_eq!(burn_rate(&[]), 0.0);
        assert_eq!(variable_costs(&[]), 0.0);
    }

    #[test]
    fn test_inactive_obligations_ignored() {
        let obligations = vec![
            obligation("rent", 8000.0, true, true),
            obligation("gym", 500.0, false, true),
            obligation("old-phone", 300.0, true, false),
            obligation("old-stream", 150.0, false, false),
        ];

        assert_eq!(burn_rate(&obligations), 8000.0);
        assert_eq!(variable_costs(&obligations), 500.0);
    }

    #[test]
    fn test_buckets_sum_to_active_total() {
        let obligations = vec![
            obligation("a", 120.5, true, true),
            obligation("b", 80.25, false, true),
            obligation("c", 999.0, false, false),
            obligation("d", 42.0, true, true),
            obligation("e", 7.75, false, true),
        ];

        let active_total: f64 = obligations
            .iter()
            .filter(|o| o.is_active)
            .map(|o| o.amount)
            .sum();

        let total = burn_rate(&obligations) + variable_costs(&obligations);
        assert!((total - active_total).abs() < 1e-9);
    }

    #[test]
    fn test_negative_amounts_pass_through() {
        let obligations = vec![
            obligation("refund", -100.0, true, true),
            obligation("rent", 500.0, true, true),
        ];
        assert_eq!(burn_rate(&obligations), 400.0);
    }

    #[test]
    fn test_classify_keeps_order() {
        let obligations = vec![
            obligation("rent", 8000.0, true, true),
            obligation("gym", 500.0, false, true),
            obligation("insurance", 900.0, true, true),
            obligation("paused", 10.0, true, false),
        ];

        let buckets = classify(&obligations);
        let essential: Vec<&str> = buckets.essential.iter().map(|o| o.id.as_str()).collect();
        let variable: Vec<&str> = buckets.variable.iter().map(|o| o.id.as_str()).collect();

        assert_eq!(essential, vec!["rent", "insurance"]);
        assert_eq!(variable, vec!["gym"]);
    }
}
