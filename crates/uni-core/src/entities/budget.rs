use serde::{Deserialize, Serialize};

use crate::enums::BudgetType;
use crate::lenient;

/// A department budget line for one year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub department: String,
    #[serde(default, deserialize_with = "lenient::opt_enum")]
    pub budget_type: Option<BudgetType>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub allocated_amount: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub spent_amount: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub committed_amount: f64,
    /// Server-computed and may net out commitments; utilization recomputes it.
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub remaining_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub is_active: Option<bool>,
}
