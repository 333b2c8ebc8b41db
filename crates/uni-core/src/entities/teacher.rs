use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::TeacherRank;
use crate::lenient;

/// A teaching staff member. Name and email come from the linked user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub teacher_id: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub user_first_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub user_last_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub user_email: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub user_phone: String,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub hire_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub department: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub specialization: String,
    #[serde(default, deserialize_with = "lenient::opt_enum")]
    pub rank: Option<TeacherRank>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub office_number: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub office_hours: String,
}

impl Teacher {
    #[must_use]
    pub fn full_name(&self) -> String {
        super::join_name(&self.user_first_name, &self.user_last_name)
    }
}
