//! # uni-forms
//!
//! Form state for every editable record. A form holds the raw text the user
//! typed ([`Draft`]), checks it synchronously ([`FormController::validate`]),
//! and shapes it into the JSON body the backend expects:
//! [`FormController::payload`] for creation, [`FormController::changes`] for
//! partial updates.

pub mod budget;
pub mod controller;
pub mod course;
pub mod draft;
pub mod enrollment;
pub mod error;
pub mod exam;
pub mod grade;
pub mod registration;
pub mod rules;
pub mod student;
pub mod teacher;
pub mod transaction;

pub use budget::BudgetForm;
pub use controller::FormController;
pub use course::CourseForm;
pub use draft::Draft;
pub use enrollment::EnrollmentForm;
pub use error::ValidationErrors;
pub use exam::ExamForm;
pub use grade::GradeForm;
pub use registration::RegistrationForm;
pub use student::StudentForm;
pub use teacher::TeacherForm;
pub use transaction::{Beneficiary, TransactionForm};
