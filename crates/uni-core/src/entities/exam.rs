use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{ExamStatus, ExamType};
use crate::lenient;
use crate::reference::EntityRef;

/// A scheduled exam. `time` is kept as the backend's `HH:MM[:SS]` text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    #[serde(default)]
    pub course: EntityRef,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub course_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub course_code: String,
    #[serde(default, deserialize_with = "lenient::opt_enum")]
    pub exam_type: Option<ExamType>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub exam_code: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub time: String,
    /// Free text, e.g. `"2 heures"`.
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub max_students: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_enum")]
    pub status: Option<ExamStatus>,
}
