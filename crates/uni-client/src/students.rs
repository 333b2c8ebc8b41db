//! Student records.

use serde_json::Value;
use uni_auth::CredentialProvider;
use uni_core::entities::Student;
use uni_forms::StudentForm;

use crate::{ApiClient, ApiFailure, ApiListing, ListQuery};

const STUDENTS: &str = "students/";

fn student_path(id: i64) -> String {
    format!("{STUDENTS}{id}/")
}

impl<C: CredentialProvider> ApiClient<C> {
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn list_students(&self, query: &ListQuery) -> ApiListing<Student> {
        self.list(STUDENTS, query).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn student(&self, id: i64) -> Result<Student, ApiFailure> {
        self.fetch(&student_path(id)).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn create_student(&self, form: &StudentForm) -> Result<Student, ApiFailure> {
        self.create_from(STUDENTS, form).await
    }

    /// Full update.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn update_student(&self, id: i64, form: &StudentForm) -> Result<Student, ApiFailure> {
        self.replace_from(&student_path(id), form).await
    }

    /// Partial update with the changed fields only.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn patch_student(&self, id: i64, form: &StudentForm) -> Result<Student, ApiFailure> {
        self.patch_from(&student_path(id), form).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn delete_student(&self, id: i64) -> Result<(), ApiFailure> {
        self.delete(&student_path(id)).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn student_statistics(&self) -> Result<Value, ApiFailure> {
        self.statistics("students/statistics/").await
    }
}
