use serde_json::{Map, Value, json};
use uni_core::entities::Course;
use uni_core::enums::Semester;

use crate::controller::FormController;
use crate::draft::{Draft, current_year, object, opt_text};
use crate::error::ValidationErrors;
use crate::rules::Checks;

pub const DEFAULT_CREDITS: i64 = 3;
pub const DEFAULT_MAX_STUDENTS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseForm {
    draft: Draft,
}

impl Default for CourseForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            draft: Draft::with_initial([
                ("credits", DEFAULT_CREDITS.to_string()),
                ("semester", Semester::Fall.as_str().to_string()),
                ("academic_year", current_year().to_string()),
                ("max_students", DEFAULT_MAX_STUDENTS.to_string()),
            ]),
        }
    }

    #[must_use]
    pub fn edit(course: &Course) -> Self {
        Self {
            draft: Draft::with_initial([
                ("course_code", course.course_code.clone()),
                ("title", course.title.clone()),
                ("description", course.description.clone()),
                ("credits", opt_text(course.credits)),
                ("department", course.department.clone()),
                ("semester", opt_text(course.semester)),
                ("academic_year", opt_text(course.academic_year)),
                ("max_students", opt_text(course.max_students)),
                ("schedule", course.schedule.clone()),
                ("teacher", opt_text(course.teacher.id())),
            ]),
        }
    }
}

impl FormController for CourseForm {
    const ENTITY: &'static str = "course";

    fn draft(&self) -> &Draft {
        &self.draft
    }

    fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let d = &self.draft;
        Checks::new(d)
            .required("course_code", "Le code du cours est requis")
            .required("title", "Le titre du cours est requis")
            .required("description", "La description est requise")
            .required("credits", "Les crédits sont requis")
            .integer_in("credits", 1..=10, "Les crédits doivent être entre 1 et 10")
            .required("department", "Le département est requis")
            .required("semester", "Le semestre est requis")
            .choice::<Semester>("semester", "Semestre inconnu")
            .integer_in("academic_year", 2000..=2100, "L'année académique est invalide")
            .integer_in(
                "max_students",
                1..=i64::MAX,
                "Le nombre maximum d'étudiants doit être au moins 1",
            )
            .check(
                d.is_blank("teacher") || d.integer("teacher").is_some(),
                "teacher",
                "L'identifiant doit être un nombre valide",
            )
            .finish()
    }

    fn payload(&self) -> Map<String, Value> {
        let d = &self.draft;
        object(json!({
            "course_code": d.text_value("course_code"),
            "title": d.text_value("title"),
            "description": d.text_value("description"),
            "credits": d.integer("credits").unwrap_or(DEFAULT_CREDITS),
            "department": d.text_value("department"),
            "semester": d.text_value("semester"),
            "academic_year": d.integer_value("academic_year"),
            "max_students": d.integer("max_students").unwrap_or(DEFAULT_MAX_STUDENTS),
            "schedule": d.text_value("schedule"),
            "teacher": d.integer_value("teacher"),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn filled() -> CourseForm {
        let mut form = CourseForm::new();
        form.set("course_code", "INF101");
        form.set("title", "Algorithmique");
        form.set("description", "Structures de données et complexité");
        form.set("department", "Informatique");
        form
    }

    #[test]
    fn defaults_fill_the_payload() {
        let body = filled().submit().unwrap();
        assert_eq!(body["credits"], 3);
        assert_eq!(body["max_students"], 30);
        assert_eq!(body["semester"], "fall");
        assert_eq!(body["teacher"], Value::Null);
        assert_eq!(body["academic_year"], current_year());
    }

    #[rstest]
    #[case("0", false)]
    #[case("1", true)]
    #[case("10", true)]
    #[case("11", false)]
    #[case("2.5", false)]
    fn credits_range(#[case] credits: &str, #[case] ok: bool) {
        let mut form = filled();
        form.set("credits", credits);
        assert_eq!(form.validate().is_ok(), ok);
    }

    #[test]
    fn teacher_is_sent_as_id() {
        let mut form = filled();
        form.set("teacher", "7");
        assert_eq!(form.submit().unwrap()["teacher"], 7);

        form.set("teacher", "Karim Haddad");
        assert!(form.validate().unwrap_err().contains("teacher"));
    }

    #[test]
    fn edit_prefills_teacher_from_nested_reference() {
        let course: Course = serde_json::from_value(json!({
            "id": 5, "course_code": "INF101", "teacher": {"id": 3, "full_name": "Karim Haddad"},
            "credits": 4, "academic_year": 2024
        }))
        .unwrap();
        let mut form = CourseForm::edit(&course);
        assert_eq!(form.draft().get("teacher"), "3");

        form.set("teacher", "");
        assert_eq!(form.changes(), object(json!({"teacher": null})));
    }
}
