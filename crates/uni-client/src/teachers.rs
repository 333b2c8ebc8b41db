//! Teacher records.

use serde_json::Value;
use uni_auth::CredentialProvider;
use uni_core::entities::Teacher;
use uni_forms::TeacherForm;

use crate::{ApiClient, ApiFailure, ApiListing, ListQuery};

const TEACHERS: &str = "teachers/";

fn teacher_path(id: i64) -> String {
    format!("{TEACHERS}{id}/")
}

impl<C: CredentialProvider> ApiClient<C> {
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn list_teachers(&self, query: &ListQuery) -> ApiListing<Teacher> {
        self.list(TEACHERS, query).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn teacher(&self, id: i64) -> Result<Teacher, ApiFailure> {
        self.fetch(&teacher_path(id)).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn create_teacher(&self, form: &TeacherForm) -> Result<Teacher, ApiFailure> {
        self.create_from(TEACHERS, form).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn update_teacher(&self, id: i64, form: &TeacherForm) -> Result<Teacher, ApiFailure> {
        self.replace_from(&teacher_path(id), form).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn patch_teacher(&self, id: i64, form: &TeacherForm) -> Result<Teacher, ApiFailure> {
        self.patch_from(&teacher_path(id), form).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn delete_teacher(&self, id: i64) -> Result<(), ApiFailure> {
        self.delete(&teacher_path(id)).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn teacher_statistics(&self) -> Result<Value, ApiFailure> {
        self.statistics("teachers/statistics/").await
    }
}
