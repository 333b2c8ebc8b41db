//! Typed records served by the backend.
//!
//! Every field is lenient: missing fields take their default, decimals may
//! arrive as numbers or strings, and unknown choice values decode as `None`.
//! Foreign keys are [`EntityRef`](crate::EntityRef)s.

mod budget;
mod course;
mod enrollment;
mod exam;
mod grade;
mod student;
mod teacher;
mod transaction;
mod user;

pub use budget::Budget;
pub use course::Course;
pub use enrollment::Enrollment;
pub use exam::Exam;
pub use grade::Grade;
pub use student::Student;
pub use teacher::Teacher;
pub use transaction::Transaction;
pub use user::UserProfile;

/// Join a first and last name, skipping whichever is blank.
pub(crate) fn join_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim()).trim().to_string()
}
