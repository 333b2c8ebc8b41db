use serde_json::{Map, Value, json};
use uni_core::entities::Student;
use uni_core::enums::StudentStatus;

use crate::controller::FormController;
use crate::draft::{Draft, date_text, object, opt_text};
use crate::error::ValidationErrors;
use crate::rules::Checks;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentForm {
    draft: Draft,
}

impl Default for StudentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl StudentForm {
    /// Empty form for a new student.
    #[must_use]
    pub fn new() -> Self {
        Self {
            draft: Draft::with_initial([
                ("current_year", "1"),
                ("gpa", "0"),
                ("status", StudentStatus::Active.as_str()),
            ]),
        }
    }

    /// Form prefilled from an existing student.
    #[must_use]
    pub fn edit(student: &Student) -> Self {
        Self {
            draft: Draft::with_initial([
                ("student_id", student.student_id.clone()),
                ("first_name", student.first_name.clone()),
                ("last_name", student.last_name.clone()),
                ("email", student.email.clone()),
                ("phone", student.phone.clone()),
                ("date_of_birth", date_text(student.date_of_birth)),
                ("enrollment_date", date_text(student.enrollment_date)),
                ("graduation_date", date_text(student.graduation_date)),
                ("faculty", student.faculty.clone()),
                ("department", student.department.clone()),
                ("current_year", opt_text(student.current_year)),
                ("gpa", opt_text(student.gpa)),
                ("status", opt_text(student.status)),
            ]),
        }
    }
}

impl FormController for StudentForm {
    const ENTITY: &'static str = "student";

    fn draft(&self) -> &Draft {
        &self.draft
    }

    fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new(&self.draft)
            .required("student_id", "L'ID étudiant est requis")
            .required("first_name", "Le prénom est requis")
            .required("last_name", "Le nom est requis")
            .required("email", "L'email est requis")
            .email("email")
            .required("enrollment_date", "La date d'inscription est requise")
            .date("enrollment_date")
            .date("date_of_birth")
            .date("graduation_date")
            .required("department", "Le département est requis")
            .integer_in("current_year", 1..=10, "L'année d'étude doit être entre 1 et 10")
            .number_in("gpa", 0.0..=4.0, "Le GPA doit être entre 0 et 4")
            .choice::<StudentStatus>("status", "Statut inconnu")
            .finish()
    }

    fn payload(&self) -> Map<String, Value> {
        let d = &self.draft;
        object(json!({
            "student_id": d.text_value("student_id"),
            "first_name": d.text_value("first_name"),
            "last_name": d.text_value("last_name"),
            "email": d.text_value("email"),
            "phone": d.text_value("phone"),
            "date_of_birth": d.nullable_text("date_of_birth"),
            "enrollment_date": d.text_value("enrollment_date"),
            "graduation_date": d.nullable_text("graduation_date"),
            "faculty": d.text_value("faculty"),
            "department": d.text_value("department"),
            "current_year": d.integer_value("current_year"),
            "gpa": d.number_or("gpa", 0.0),
            "status": d.text_value("status"),
        }))
    }
}
