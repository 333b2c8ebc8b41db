use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::StudentStatus;
use crate::lenient;

/// A registered student. `student_id` is the matriculation code (`IT2024012`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub student_id: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub graduation_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub faculty: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub department: String,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub current_year: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub gpa: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_enum")]
    pub status: Option<StudentStatus>,
}

impl Student {
    #[must_use]
    pub fn full_name(&self) -> String {
        super::join_name(&self.first_name, &self.last_name)
    }
}
