//! Course grades.

use serde_json::{Value, json};
use uni_auth::CredentialProvider;
use uni_core::entities::Grade;
use uni_forms::{FormController, GradeForm, ValidationErrors};

use crate::http::decode_record;
use crate::{ApiClient, ApiFailure, ApiListing, ListQuery};

const GRADES: &str = "grades/";

impl<C: CredentialProvider> ApiClient<C> {
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn list_grades(&self, query: &ListQuery) -> ApiListing<Grade> {
        self.list(GRADES, query).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn grade(&self, id: i64) -> Result<Grade, ApiFailure> {
        self.fetch(&format!("{GRADES}{id}/")).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn grades_for_student(&self, student: i64) -> ApiListing<Grade> {
        self.list(&format!("{GRADES}student/{student}/"), &ListQuery::new())
            .await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn grades_for_course(&self, course: i64) -> ApiListing<Grade> {
        self.list(&format!("{GRADES}course/{course}/"), &ListQuery::new())
            .await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn create_grade(&self, form: &GradeForm) -> Result<Grade, ApiFailure> {
        self.create_from(GRADES, form).await
    }

    /// `PUT` the fields changed since the form was opened. Student and
    /// course are never sent.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn update_grade(&self, id: i64, form: &GradeForm) -> Result<Grade, ApiFailure> {
        let body = form.submit_changes()?;
        decode_record(&self.put(&format!("{GRADES}{id}/"), &body).await?)
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn patch_grade(&self, id: i64, form: &GradeForm) -> Result<Grade, ApiFailure> {
        self.patch_from(&format!("{GRADES}{id}/"), form).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn delete_grade(&self, id: i64) -> Result<(), ApiFailure> {
        self.delete(&format!("{GRADES}{id}/")).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn grade_statistics(&self) -> Result<Value, ApiFailure> {
        self.statistics("grades/statistics/").await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn grade_summary(&self) -> Result<Value, ApiFailure> {
        self.statistics("grades/summary/").await
    }

    /// Create every grade in one request.
    ///
    /// Nothing is sent unless every form validates. Field errors are keyed
    /// `"<row>.<field>"`, rows counted from 0.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when a form is invalid, the request fails,
    /// or the server reports `success: false`.
    pub async fn bulk_create_grades(&self, forms: &[GradeForm]) -> Result<Value, ApiFailure> {
        let mut errors = ValidationErrors::new();
        let mut rows = Vec::with_capacity(forms.len());
        for (row, form) in forms.iter().enumerate() {
            match form.validate() {
                Ok(()) => rows.push(Value::Object(form.payload())),
                Err(invalid) => {
                    for (field, message) in invalid.iter() {
                        errors.add(&format!("{row}.{field}"), message);
                    }
                }
            }
        }
        errors.into_result()?;

        tracing::debug!(count = rows.len(), "bulk course grades");
        self.post("grades/bulk/", &json!({ "grades": rows })).await
    }
}
