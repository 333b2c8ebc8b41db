use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::EnrollmentStatus;
use crate::lenient;
use crate::reference::EntityRef;

/// A student's registration in a course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    #[serde(default)]
    pub student: EntityRef,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub student_name: String,
    #[serde(default)]
    pub course: EntityRef,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub course_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub course_code: String,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub enrollment_date: Option<NaiveDate>,
    /// Letter grade `A`..`F`, empty until graded.
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub grade: String,
    #[serde(default, deserialize_with = "lenient::opt_enum")]
    pub status: Option<EnrollmentStatus>,
}
