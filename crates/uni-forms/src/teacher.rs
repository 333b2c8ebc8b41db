use serde_json::{Map, Value, json};
use uni_core::entities::Teacher;
use uni_core::enums::TeacherRank;

use crate::controller::FormController;
use crate::draft::{Draft, date_text, object, opt_text};
use crate::error::ValidationErrors;
use crate::rules::Checks;

/// Teacher form. Name, email and phone are written to the linked user
/// account; the backend reads them from plain `first_name`/`last_name` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherForm {
    draft: Draft,
}

impl TeacherForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn edit(teacher: &Teacher) -> Self {
        Self {
            draft: Draft::with_initial([
                ("teacher_id", teacher.teacher_id.clone()),
                ("first_name", teacher.user_first_name.clone()),
                ("last_name", teacher.user_last_name.clone()),
                ("email", teacher.user_email.clone()),
                ("phone", teacher.user_phone.clone()),
                ("hire_date", date_text(teacher.hire_date)),
                ("department", teacher.department.clone()),
                ("specialization", teacher.specialization.clone()),
                ("rank", opt_text(teacher.rank)),
                ("office_number", teacher.office_number.clone()),
                ("office_hours", teacher.office_hours.clone()),
            ]),
        }
    }
}

impl FormController for TeacherForm {
    const ENTITY: &'static str = "teacher";

    fn draft(&self) -> &Draft {
        &self.draft
    }

    fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new(&self.draft)
            .required("teacher_id", "L'ID enseignant est requis")
            .required("first_name", "Le prénom est requis")
            .required("last_name", "Le nom est requis")
            .required("email", "L'email est requis")
            .email("email")
            .required("hire_date", "La date d'embauche est requise")
            .date("hire_date")
            .date("date_of_birth")
            .required("department", "Le département est requis")
            .required("specialization", "La spécialisation est requise")
            .required("rank", "Le grade est requis")
            .choice::<TeacherRank>("rank", "Grade inconnu")
            .finish()
    }

    fn payload(&self) -> Map<String, Value> {
        let d = &self.draft;
        object(json!({
            "teacher_id": d.text_value("teacher_id"),
            "first_name": d.text_value("first_name"),
            "last_name": d.text_value("last_name"),
            "email": d.text_value("email"),
            "phone": d.text_value("phone"),
            "date_of_birth": d.nullable_text("date_of_birth"),
            "hire_date": d.text_value("hire_date"),
            "department": d.text_value("department"),
            "specialization": d.text_value("specialization"),
            "rank": d.text_value("rank"),
            "office_number": d.text_value("office_number"),
            "office_hours": d.text_value("office_hours"),
        }))
    }
}
