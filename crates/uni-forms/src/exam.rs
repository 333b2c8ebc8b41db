use chrono::NaiveTime;
use serde_json::{Map, Value, json};
use uni_core::entities::Exam;
use uni_core::enums::{ExamStatus, ExamType};

use crate::controller::FormController;
use crate::course::DEFAULT_MAX_STUDENTS;
use crate::draft::{Draft, date_text, object, opt_text};
use crate::error::ValidationErrors;
use crate::rules::Checks;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamForm {
    draft: Draft,
}

impl Default for ExamForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ExamForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            draft: Draft::with_initial([
                ("exam_type", ExamType::Final.as_str().to_string()),
                ("status", ExamStatus::Upcoming.as_str().to_string()),
                ("max_students", DEFAULT_MAX_STUDENTS.to_string()),
            ]),
        }
    }

    #[must_use]
    pub fn edit(exam: &Exam) -> Self {
        Self {
            draft: Draft::with_initial([
                ("course", opt_text(exam.course.id())),
                ("exam_type", opt_text(exam.exam_type)),
                ("title", exam.title.clone()),
                ("description", exam.description.clone()),
                ("date", date_text(exam.date)),
                ("time", exam.time.clone()),
                ("duration", exam.duration.clone()),
                ("location", exam.location.clone()),
                ("max_students", opt_text(exam.max_students)),
                ("status", opt_text(exam.status)),
            ]),
        }
    }
}

/// `HH:MM` or `HH:MM:SS`.
fn parse_time(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .ok()
}

impl FormController for ExamForm {
    const ENTITY: &'static str = "exam";

    fn draft(&self) -> &Draft {
        &self.draft
    }

    fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let d = &self.draft;
        Checks::new(d)
            .id("course", "Veuillez sélectionner un cours")
            .required("title", "Le titre est requis")
            .required("date", "La date est requise")
            .date("date")
            .required("time", "L'heure est requise")
            .check(
                d.is_blank("time") || parse_time(d.get("time")).is_some(),
                "time",
                "Heure invalide (HH:MM)",
            )
            .required("duration", "La durée est requise")
            .required("location", "Le lieu est requis")
            .integer_in(
                "max_students",
                1..=i64::MAX,
                "Le nombre maximum d'étudiants doit être au moins 1",
            )
            .choice::<ExamType>("exam_type", "Type d'examen inconnu")
            .choice::<ExamStatus>("status", "Statut inconnu")
            .finish()
    }

    fn payload(&self) -> Map<String, Value> {
        let d = &self.draft;
        object(json!({
            "course": d.integer_value("course"),
            "exam_type": d.text_value("exam_type"),
            "title": d.text_value("title"),
            "description": d.text_value("description"),
            "date": d.text_value("date"),
            "time": d.text_value("time"),
            "duration": d.text_value("duration"),
            "location": d.text_value("location"),
            "max_students": d.integer("max_students").unwrap_or(DEFAULT_MAX_STUDENTS),
            "status": d.text_value("status"),
        }))
    }
}
