use serde_json::{Map, Value, json};
use uni_core::entities::Enrollment;
use uni_core::enums::EnrollmentStatus;

use crate::controller::FormController;
use crate::draft::{Draft, date_text, object, opt_text};
use crate::error::ValidationErrors;
use crate::rules::Checks;

const LETTER_GRADES: [&str; 5] = ["A", "B", "C", "D", "F"];

/// Registration of a student in a course. The pair is fixed once created;
/// only status, grade and date can be edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentForm {
    draft: Draft,
}

impl Default for EnrollmentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EnrollmentForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            draft: Draft::with_initial([("status", EnrollmentStatus::Enrolled.as_str())]),
        }
    }

    #[must_use]
    pub fn edit(enrollment: &Enrollment) -> Self {
        Self {
            draft: Draft::with_initial([
                ("student", opt_text(enrollment.student.id())),
                ("course", opt_text(enrollment.course.id())),
                ("enrollment_date", date_text(enrollment.enrollment_date)),
                ("grade", enrollment.grade.clone()),
                ("status", opt_text(enrollment.status)),
            ]),
        }
    }
}

impl FormController for EnrollmentForm {
    const ENTITY: &'static str = "enrollment";

    fn draft(&self) -> &Draft {
        &self.draft
    }

    fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let d = &self.draft;
        Checks::new(d)
            .id("student", "L'étudiant est requis")
            .id("course", "Le cours est requis")
            .date("enrollment_date")
            .choice::<EnrollmentStatus>("status", "Statut inconnu")
            .check(
                d.is_blank("grade") || LETTER_GRADES.contains(&d.get("grade")),
                "grade",
                "La mention doit être A, B, C, D ou F",
            )
            .finish()
    }

    fn payload(&self) -> Map<String, Value> {
        let d = &self.draft;
        let mut body = object(json!({
            "student": d.integer_value("student"),
            "course": d.integer_value("course"),
            "status": d.text_value("status"),
            "grade": d.text_value("grade"),
        }));
        if !d.is_blank("enrollment_date") {
            body.insert("enrollment_date".into(), d.text_value("enrollment_date"));
        }
        body
    }

    fn fixed_on_update(&self) -> &'static [&'static str] {
        &["student", "course"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ids_are_required_and_numeric() {
        let mut form = EnrollmentForm::new();
        form.set("course", "INF101");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("student"), Some("L'étudiant est requis"));
        assert!(errors.contains("course"));

        form.set("student", "12");
        form.set("course", "5");
        assert_eq!(
            form.submit().unwrap(),
            json!({"student": 12, "course": 5, "status": "enrolled", "grade": ""})
        );
    }

    #[test]
    fn letter_grade() {
        let mut form = EnrollmentForm::new();
        form.set("student", "12");
        form.set("course", "5");
        form.set("grade", "E");
        assert!(form.validate().unwrap_err().contains("grade"));
    }

    #[test]
    fn update_never_moves_the_enrollment() {
        let enrollment: Enrollment =
            serde_json::from_value(json!({"id": 1, "student": 12, "course": 5, "status": "enrolled"}))
                .unwrap();
        let mut form = EnrollmentForm::edit(&enrollment);
        form.set("course", "6");
        form.set("status", "completed");
        form.set("grade", "B");
        assert_eq!(
            form.changes(),
            object(json!({"status": "completed", "grade": "B"}))
        );
    }
}
