use serde::Serialize;
use serde_json::Value;
use uni_core::entities::Budget;
use uni_core::lenient::parse_number;

use crate::aggregate::percent_of;

/// Share of spending above which a budget is flagged.
pub const WARNING_PERCENT: f64 = 80.0;
pub const OVER_BUDGET_PERCENT: f64 = 100.0;

/// How much of a budget has been used.
///
/// `remaining` goes negative once spending exceeds the allocation; it is not
/// clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetUtilization {
    pub allocated: f64,
    pub spent: f64,
    pub remaining: f64,
    pub percent_spent: f64,
    pub is_over_budget: bool,
    pub is_warning: bool,
}

impl BudgetUtilization {
    #[must_use]
    pub fn compute(allocated: f64, spent: f64) -> Self {
        let percent_spent = percent_of(spent, allocated);
        Self {
            allocated,
            spent,
            remaining: allocated - spent,
            percent_spent,
            is_over_budget: percent_spent > OVER_BUDGET_PERCENT,
            is_warning: percent_spent > WARNING_PERCENT,
        }
    }

    /// Utilization of a typed budget. The server's `remaining_amount` may
    /// also subtract commitments, so it is not used.
    #[must_use]
    pub fn for_budget(budget: &Budget) -> Self {
        Self::compute(budget.allocated_amount, budget.spent_amount)
    }

    /// Utilization of a raw budget record. Unparseable amounts count as `0`.
    #[must_use]
    pub fn for_record(record: &Value) -> Self {
        let amount = |field: &str| record.get(field).and_then(parse_number);
        let allocated = amount("allocated_amount").unwrap_or(0.0);
        let spent = amount("spent_amount").unwrap_or(0.0);
        Self::compute(allocated, spent)
    }

    /// Utilization across several budgets, from their summed amounts.
    #[must_use]
    pub fn combined(budgets: &[Budget]) -> Self {
        let allocated = budgets.iter().map(|b| b.allocated_amount).sum();
        let spent = budgets.iter().map(|b| b.spent_amount).sum();
        Self::compute(allocated, spent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn overspent_budget_is_not_clamped() {
        let u = BudgetUtilization::for_record(&json!({"allocated_amount": 1000, "spent_amount": 1200}));
        assert_eq!(u.percent_spent, 120.0);
        assert_eq!(u.remaining, -200.0);
        assert!(u.is_over_budget);
        assert!(u.is_warning);
    }

    #[test]
    fn warning_starts_above_eighty_percent() {
        let at = BudgetUtilization::compute(1000.0, 800.0);
        assert!(!at.is_warning);
        let above = BudgetUtilization::compute(1000.0, 810.0);
        assert!(above.is_warning);
        assert!(!above.is_over_budget);
        let full = BudgetUtilization::compute(1000.0, 1000.0);
        assert!(!full.is_over_budget);
    }

    #[test]
    fn zero_allocation_is_zero_percent() {
        let u = BudgetUtilization::compute(0.0, 250.0);
        assert_eq!(u.percent_spent, 0.0);
        assert_eq!(u.remaining, -250.0);
        assert!(!u.is_warning);
    }

    #[test]
    fn remaining_ignores_server_figure() {
        let budget = Budget {
            allocated_amount: 1000.0,
            spent_amount: 300.0,
            committed_amount: 200.0,
            remaining_amount: Some(500.0),
            ..Budget::default()
        };
        assert_eq!(BudgetUtilization::for_budget(&budget).remaining, 700.0);

        let record = json!({
            "allocated_amount": "1000.000",
            "spent_amount": "300.000",
            "remaining_amount": "500.000"
        });
        assert_eq!(BudgetUtilization::for_record(&record).remaining, 700.0);

        let zero = json!({"allocated_amount": 1000, "spent_amount": 300, "remaining_amount": 0});
        assert_eq!(BudgetUtilization::for_record(&zero).remaining, 700.0);
    }

    #[test]
    fn combined_sums_before_dividing() {
        let budgets = [
            Budget {
                allocated_amount: 1000.0,
                spent_amount: 900.0,
                ..Budget::default()
            },
            Budget {
                allocated_amount: 3000.0,
                spent_amount: 100.0,
                ..Budget::default()
            },
        ];
        let u = BudgetUtilization::combined(&budgets);
        assert_eq!(u.percent_spent, 25.0);
        assert_eq!(u.remaining, 3000.0);
    }
}
