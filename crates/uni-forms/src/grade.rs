use serde_json::{Map, Value, json};
use uni_core::entities::Grade;
use uni_core::enums::Semester;

use crate::controller::FormController;
use crate::draft::{Draft, current_year, object, opt_text};
use crate::error::ValidationErrors;
use crate::rules::Checks;

pub const MAX_SCORE: f64 = 20.0;

/// A score out of 20 for one student in one course and term.
///
/// On update only score, semester, year and comment are sent; the student
/// and course of an existing grade cannot change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeForm {
    draft: Draft,
}

impl Default for GradeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl GradeForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            draft: Draft::with_initial([
                ("semester", Semester::Fall.as_str().to_string()),
                ("academic_year", current_year().to_string()),
            ]),
        }
    }

    #[must_use]
    pub fn edit(grade: &Grade) -> Self {
        Self {
            draft: Draft::with_initial([
                ("student", opt_text(grade.student.id())),
                ("course", opt_text(grade.course.id())),
                ("score", opt_text(grade.score)),
                ("semester", opt_text(grade.semester)),
                ("academic_year", opt_text(grade.academic_year)),
                ("comment", grade.comment.clone()),
            ]),
        }
    }
}

impl FormController for GradeForm {
    const ENTITY: &'static str = "grade";

    fn draft(&self) -> &Draft {
        &self.draft
    }

    fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new(&self.draft)
            .id("student", "L'étudiant est requis")
            .id("course", "Le cours est requis")
            .required("score", "La note est requise")
            .number_in("score", 0.0..=MAX_SCORE, "La note doit être entre 0 et 20")
            .required("semester", "Le semestre est requis")
            .choice::<Semester>("semester", "Semestre inconnu")
            .required("academic_year", "L'année académique est requise")
            .integer_in("academic_year", 2000..=2100, "L'année doit être valide (2000-2100)")
            .finish()
    }

    fn payload(&self) -> Map<String, Value> {
        let d = &self.draft;
        object(json!({
            "student": d.integer_value("student"),
            "course": d.integer_value("course"),
            "score": d.number_value("score"),
            "semester": d.text_value("semester"),
            "academic_year": d.integer_value("academic_year"),
            "comment": d.text_value("comment"),
        }))
    }

    fn fixed_on_update(&self) -> &'static [&'static str] {
        &["student", "course"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn filled(score: &str) -> GradeForm {
        let mut form = GradeForm::new();
        form.set("student", "12");
        form.set("course", "5");
        form.set("score", score);
        form.set("academic_year", "2024");
        form
    }

    #[rstest]
    #[case("0", None)]
    #[case("20", None)]
    #[case("14.5", None)]
    #[case("20.5", Some("La note doit être entre 0 et 20"))]
    #[case("-0.5", Some("La note doit être entre 0 et 20"))]
    #[case("N/A", Some("Doit être un nombre"))]
    #[case("", Some("La note est requise"))]
    fn score_validation(#[case] score: &str, #[case] expected: Option<&str>) {
        let result = filled(score).validate();
        assert_eq!(result.err().and_then(|e| e.get("score").map(String::from)).as_deref(), expected);
    }

    #[rstest]
    #[case("1999")]
    #[case("2101")]
    fn academic_year_out_of_range(#[case] year: &str) {
        let mut form = filled("14");
        form.set("academic_year", year);
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("academic_year"), Some("L'année doit être valide (2000-2100)"));
    }

    #[test]
    fn create_body() {
        assert_eq!(
            filled("14.5").submit().unwrap(),
            json!({
                "student": 12, "course": 5, "score": 14.5,
                "semester": "fall", "academic_year": 2024, "comment": ""
            })
        );
    }

    #[test]
    fn update_body_excludes_student_and_course() {
        let grade: Grade = serde_json::from_value(json!({
            "id": 2, "student": 12, "course": 5, "score": "14.50",
            "semester": "spring", "academic_year": 2024, "comment": ""
        }))
        .unwrap();
        let mut form = GradeForm::edit(&grade);
        form.set("score", "15");
        form.set("student", "13");
        assert_eq!(form.submit_changes().unwrap(), json!({"score": 15.0}));
    }
}
