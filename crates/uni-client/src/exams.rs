//! Exams and the scores recorded against them.

use serde::Serialize;
use serde_json::{Value, json};
use uni_auth::CredentialProvider;
use uni_core::entities::Exam;
use uni_forms::ExamForm;

use crate::{ApiClient, ApiFailure, ApiListing, ListQuery};

const EXAMS: &str = "exams/exams/";
const EXAM_GRADES: &str = "exams/grades/";

/// One student's score on an exam, as sent to the exam grade endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamScore {
    pub student: i64,
    pub score: f64,
    pub comments: String,
}

impl ExamScore {
    #[must_use]
    pub fn new(student: i64, score: f64) -> Self {
        Self {
            student,
            score,
            comments: String::new(),
        }
    }

    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }
}

impl<C: CredentialProvider> ApiClient<C> {
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn list_exams(&self, query: &ListQuery) -> ApiListing<Exam> {
        self.list(EXAMS, query).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn exam(&self, id: i64) -> Result<Exam, ApiFailure> {
        self.fetch(&format!("{EXAMS}{id}/")).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn create_exam(&self, form: &ExamForm) -> Result<Exam, ApiFailure> {
        self.create_from(EXAMS, form).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn update_exam(&self, id: i64, form: &ExamForm) -> Result<Exam, ApiFailure> {
        self.replace_from(&format!("{EXAMS}{id}/"), form).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn patch_exam(&self, id: i64, form: &ExamForm) -> Result<Exam, ApiFailure> {
        self.patch_from(&format!("{EXAMS}{id}/"), form).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn delete_exam(&self, id: i64) -> Result<(), ApiFailure> {
        self.delete(&format!("{EXAMS}{id}/")).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn exam_statistics(&self) -> Result<Value, ApiFailure> {
        self.statistics("exams/statistics/").await
    }

    /// The next `limit` scheduled exams, soonest first.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn upcoming_exams(&self, limit: u32) -> ApiListing<Exam> {
        self.list("exams/upcoming/", &ListQuery::new().param("limit", limit))
            .await
    }

    // -- exam grades -------------------------------------------------------

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn list_exam_grades(&self, query: &ListQuery) -> ApiListing<Value> {
        self.list(EXAM_GRADES, query).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn exam_grades_for_student(&self, student: i64) -> ApiListing<Value> {
        self.list_exam_grades(&ListQuery::new().param("student", student))
            .await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn exam_grades_for_exam(&self, exam: i64) -> ApiListing<Value> {
        self.list_exam_grades(&ListQuery::new().param("exam", exam))
            .await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn create_exam_grade(&self, exam: i64, score: &ExamScore) -> Result<Value, ApiFailure> {
        let body = json!({
            "exam": exam,
            "student": score.student,
            "score": score.score,
            "comments": score.comments,
        });
        self.post(EXAM_GRADES, &body).await
    }

    /// Change the score or comments of a recorded exam grade.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn update_exam_grade(
        &self,
        id: i64,
        score: f64,
        comments: &str,
    ) -> Result<Value, ApiFailure> {
        let body = json!({ "score": score, "comments": comments });
        self.put(&format!("{EXAM_GRADES}{id}/"), &body).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn delete_exam_grade(&self, id: i64) -> Result<(), ApiFailure> {
        self.delete(&format!("{EXAM_GRADES}{id}/")).await
    }

    /// Record many scores for one exam in a single request.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails or the server reports
    /// `success: false`.
    pub async fn bulk_create_exam_grades(
        &self,
        exam: i64,
        scores: &[ExamScore],
    ) -> Result<Value, ApiFailure> {
        let body = json!({ "exam_id": exam, "grades": scores });
        tracing::debug!(exam, count = scores.len(), "bulk exam grades");
        self.post("exams/grades/bulk/", &body).await
    }
}
