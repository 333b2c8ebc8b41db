use serde::{Deserialize, Serialize};

use crate::enums::Semester;
use crate::lenient;
use crate::reference::EntityRef;

/// A course offering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub course_code: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub credits: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub department: String,
    #[serde(default, deserialize_with = "lenient::opt_enum")]
    pub semester: Option<Semester>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub academic_year: Option<i64>,
    #[serde(default)]
    pub teacher: EntityRef,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub teacher_name: String,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub max_students: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub schedule: String,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub enrollments_count: Option<i64>,
}
