use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{PaymentMethod, TransactionCategory, TransactionStatus, TransactionType};
use crate::lenient;
use crate::reference::EntityRef;

/// A financial transaction.
///
/// `amount` is signed: scholarships and refunds are stored as negative values.
/// `student` is usually a nested `{id, student_id, full_name, ...}` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub transaction_number: String,
    #[serde(default)]
    pub student: EntityRef,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub student_name: String,
    #[serde(default)]
    pub teacher: EntityRef,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub teacher_name: String,
    #[serde(default, deserialize_with = "lenient::opt_enum")]
    pub transaction_type: Option<TransactionType>,
    #[serde(default, deserialize_with = "lenient::opt_enum")]
    pub category: Option<TransactionCategory>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub paid_amount: f64,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub payment_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::opt_enum")]
    pub status: Option<TransactionStatus>,
    #[serde(default, deserialize_with = "lenient::opt_enum")]
    pub method: Option<PaymentMethod>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub description: String,
}
