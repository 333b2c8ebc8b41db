//! Finance summary figures, from the statistics endpoint or computed from a
//! fetched transaction list when the endpoint is unavailable or reports zeros.

use serde::Serialize;
use serde_json::Value;
use uni_core::entities::Transaction;
use uni_core::enums::{TransactionCategory, TransactionStatus, TransactionType};
use uni_core::lenient::parse_number;

use crate::aggregate::{AggregationSpec, Operation, aggregate, percent_of};
use crate::envelope::normalize_record;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FinanceSummary {
    /// Paid income.
    pub total_revenue: f64,
    pub pending_amount: f64,
    pub overdue_amount: f64,
    /// Paid scholarships, as a positive figure.
    pub scholarship_amount: f64,
    /// Paid income minus paid expenses, salaries and scholarships.
    pub net_balance: f64,
    /// Paid revenue as a share of revenue + pending + overdue.
    pub collection_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeShare {
    /// Wire name of the transaction type, `""` when unknown.
    pub transaction_type: String,
    /// Signed sum of amounts.
    pub total: f64,
    pub count: u64,
    /// `|total|` as a share of the sum of every type's `|total|`.
    pub percentage: f64,
}

impl FinanceSummary {
    #[must_use]
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let sum_where = |pred: &dyn Fn(&Transaction) -> bool| -> f64 {
            transactions
                .iter()
                .filter(|t| pred(t))
                .map(|t| t.amount)
                .filter(|a| a.is_finite())
                .sum()
        };
        let is_paid = |t: &Transaction| t.status == Some(TransactionStatus::Paid);
        let paid_in = |category: TransactionCategory| {
            sum_where(&|t: &Transaction| is_paid(t) && t.category == Some(category))
        };

        let total_revenue = paid_in(TransactionCategory::Income);
        let pending_amount = sum_where(&|t: &Transaction| t.status == Some(TransactionStatus::Pending));
        let overdue_amount = sum_where(&|t: &Transaction| t.status == Some(TransactionStatus::Overdue));
        let scholarship_amount = sum_where(&|t: &Transaction| {
            is_paid(t) && t.transaction_type == Some(TransactionType::Scholarship)
        })
        .abs();

        let net_balance = total_revenue
            - paid_in(TransactionCategory::Expense).abs()
            - paid_in(TransactionCategory::Salary).abs()
            - paid_in(TransactionCategory::Scholarship).abs();

        Self {
            total_revenue,
            pending_amount,
            overdue_amount,
            scholarship_amount,
            net_balance,
            collection_rate: percent_of(
                total_revenue,
                total_revenue + pending_amount + overdue_amount,
            ),
        }
    }

    /// Figures reported by the finance statistics endpoint.
    ///
    /// Accepts the record itself or its `{success, data}` wrapper; missing
    /// figures read as `0`.
    #[must_use]
    pub fn from_statistics(body: &Value) -> Self {
        let stats = normalize_record(body).unwrap_or(Value::Null);
        let figure = |field: &str| stats.get(field).and_then(parse_number).unwrap_or(0.0);

        let total_revenue = figure("total_income");
        let pending_amount = figure("pending_amount");
        let overdue_amount = figure("overdue_amount");
        let scholarship_amount = figure("total_scholarships").abs();
        let net_balance = stats.get("net_balance").and_then(parse_number).unwrap_or_else(|| {
            total_revenue
                - figure("total_expenses")
                - figure("total_salaries")
                - scholarship_amount
        });

        Self {
            total_revenue,
            pending_amount,
            overdue_amount,
            scholarship_amount,
            net_balance,
            collection_rate: percent_of(
                total_revenue,
                total_revenue + pending_amount + overdue_amount,
            ),
        }
    }

    /// Keep each non-zero figure, taking zero ones from `fallback`.
    #[must_use]
    pub fn filled_from(self, fallback: &Self) -> Self {
        let pick = |own: f64, other: f64| if own == 0.0 { other } else { own };
        let total_revenue = pick(self.total_revenue, fallback.total_revenue);
        let pending_amount = pick(self.pending_amount, fallback.pending_amount);
        let overdue_amount = pick(self.overdue_amount, fallback.overdue_amount);
        Self {
            total_revenue,
            pending_amount,
            overdue_amount,
            scholarship_amount: pick(self.scholarship_amount, fallback.scholarship_amount),
            net_balance: pick(self.net_balance, fallback.net_balance),
            collection_rate: percent_of(
                total_revenue,
                total_revenue + pending_amount + overdue_amount,
            ),
        }
    }
}

/// Per-type totals and counts, in first-seen order.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn type_distribution(transactions: &[Transaction]) -> Vec<TypeShare> {
    let type_key = |t: &Transaction| {
        t.transaction_type
            .map(|ty| ty.as_str().to_string())
            .unwrap_or_default()
    };
    let totals = aggregate(
        transactions,
        &AggregationSpec::new(Operation::Sum)
            .group_by(type_key)
            .value(|t: &Transaction| Some(t.amount)),
    );
    let counts = aggregate(
        transactions,
        &AggregationSpec::new(Operation::Count).group_by(type_key),
    );
    let grand_total: f64 = totals.iter().map(|(_, v)| v.abs()).sum();

    totals
        .iter()
        .map(|(key, total)| TypeShare {
            transaction_type: key.to_string(),
            total,
            count: counts.get_or_zero(key) as u64,
            percentage: percent_of(total.abs(), grand_total),
        })
        .collect()
}
