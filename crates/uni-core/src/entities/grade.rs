use serde::{Deserialize, Serialize};

use crate::enums::{ScoreBand, Semester};
use crate::lenient;
use crate::reference::EntityRef;

/// A course grade, scored out of 20.
///
/// `score` is `None` when the backend sent something non-numeric; such grades
/// fall in [`ScoreBand::Unknown`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    #[serde(default)]
    pub student: EntityRef,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub student_id: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub student_name: String,
    #[serde(default)]
    pub course: EntityRef,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub course_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub course_code: String,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub grade_category: String,
    #[serde(default, deserialize_with = "lenient::opt_enum")]
    pub semester: Option<Semester>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub academic_year: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub comment: String,
}

impl Grade {
    #[must_use]
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }

    /// Passing means at least 10 out of 20.
    #[must_use]
    pub fn is_passing(&self) -> bool {
        self.score.is_some_and(|s| s >= 10.0)
    }
}
