//! Courses and the enrollments that link students to them.

use uni_auth::CredentialProvider;
use uni_core::entities::{Course, Enrollment};
use uni_forms::{CourseForm, EnrollmentForm};

use crate::{ApiClient, ApiFailure, ApiListing, ListQuery};

const COURSES: &str = "courses/";
const ENROLLMENTS: &str = "courses/enrollments/";

impl<C: CredentialProvider> ApiClient<C> {
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn list_courses(&self, query: &ListQuery) -> ApiListing<Course> {
        self.list(COURSES, query).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn course(&self, id: i64) -> Result<Course, ApiFailure> {
        self.fetch(&format!("{COURSES}{id}/")).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn create_course(&self, form: &CourseForm) -> Result<Course, ApiFailure> {
        self.create_from(COURSES, form).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn update_course(&self, id: i64, form: &CourseForm) -> Result<Course, ApiFailure> {
        self.replace_from(&format!("{COURSES}{id}/"), form).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn patch_course(&self, id: i64, form: &CourseForm) -> Result<Course, ApiFailure> {
        self.patch_from(&format!("{COURSES}{id}/"), form).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn delete_course(&self, id: i64) -> Result<(), ApiFailure> {
        self.delete(&format!("{COURSES}{id}/")).await
    }

    // -- enrollments -------------------------------------------------------

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn list_enrollments(&self, query: &ListQuery) -> ApiListing<Enrollment> {
        self.list(ENROLLMENTS, query).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn create_enrollment(&self, form: &EnrollmentForm) -> Result<Enrollment, ApiFailure> {
        self.create_from(ENROLLMENTS, form).await
    }

    /// Record a grade or status change. Student and course never change.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn patch_enrollment(
        &self,
        id: i64,
        form: &EnrollmentForm,
    ) -> Result<Enrollment, ApiFailure> {
        self.patch_from(&format!("{ENROLLMENTS}{id}/"), form).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn delete_enrollment(&self, id: i64) -> Result<(), ApiFailure> {
        self.delete(&format!("{ENROLLMENTS}{id}/")).await
    }
}
