//! # uni-client
//!
//! REST gateway for the UniDesk backend.
//!
//! [`ApiClient`] attaches the bearer token from its [`CredentialProvider`] to
//! every request. A `401` triggers exactly one refresh and one replay; when
//! the refresh fails, or the replay is rejected too, the credentials are
//! cleared and the failure is returned. Every call resolves to
//! `Result<T, ApiFailure>`.
//!
//! Per-resource services live in their own modules as `impl ApiClient`
//! blocks:
//! - [`accounts`]: login, registration, profile
//! - [`students`], [`teachers`]
//! - [`courses`]: courses and enrollments
//! - [`exams`]: exams, exam grades, upcoming exams
//! - [`grades`]: course grades, summaries, bulk entry
//! - [`finance`]: transactions, budgets, statistics

pub mod accounts;
pub mod courses;
pub mod exams;
pub mod finance;
pub mod grades;
pub mod students;
pub mod teachers;

mod error;
mod http;
mod query;

pub use error::{
    ApiFailure, NETWORK_ERROR, NO_RESPONSE, SERVER_ERROR, UNEXPECTED_RESPONSE, VALIDATION_FAILED,
};
pub use exams::ExamScore;
pub use query::ListQuery;

use std::time::Duration;

use uni_auth::{CredentialProvider, SessionCredentials, TokenStore};
use uni_config::{ApiConfig, UniConfig};
use uni_records::Listing;

/// Result of a list call, decoded.
pub type ApiListing<T> = Result<Listing<T>, ApiFailure>;

/// HTTP client for the UniDesk REST API.
pub struct ApiClient<C> {
    http: reqwest::Client,
    config: ApiConfig,
    credentials: C,
}

impl<C: CredentialProvider> ApiClient<C> {
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the underlying `reqwest::Client` cannot be
    /// built.
    pub fn new(config: ApiConfig, credentials: C) -> Result<Self, ApiFailure> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiFailure::transport(&e))?;

        Ok(Self {
            http,
            config,
            credentials,
        })
    }

    #[must_use]
    pub fn credentials(&self) -> &C {
        &self.credentials
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// True while the provider holds an access token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credentials.access_token().is_some()
    }
}

impl ApiClient<SessionCredentials> {
    /// Client with a refreshing session resumed from the configured token
    /// store.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the API settings are unusable or an HTTP
    /// client cannot be built.
    pub fn from_config(config: &UniConfig) -> Result<Self, ApiFailure> {
        config
            .api
            .validate()
            .map_err(|e| ApiFailure::unexpected(e.to_string()))?;
        let store = TokenStore::from_config(&config.auth);
        let session = SessionCredentials::restore(&config.api, store)
            .map_err(|e| ApiFailure::unexpected(e.to_string()))?;
        Self::new(config.api.clone(), session)
    }
}
