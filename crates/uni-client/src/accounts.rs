//! Sign-in, sign-up, and the current user's profile.

use reqwest::Method;
use serde::Deserialize;
use serde_json::{Value, json};
use uni_auth::{CredentialProvider, TokenPair};
use uni_core::entities::UserProfile;
use uni_forms::{FormController, RegistrationForm};

use crate::http::{Auth, decode_record};
use crate::{ApiClient, ApiFailure, ListQuery};

const LOGIN: &str = "accounts/token/";
const REGISTER: &str = "accounts/register/";
const PROFILE: &str = "accounts/profile/";

#[derive(Deserialize)]
struct LoginResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

impl<C: CredentialProvider> ApiClient<C> {
    /// Exchange a username and password for a token pair and keep it.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the credentials are refused or the
    /// response carries no access token.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiFailure> {
        let body = json!({ "username": username, "password": password });
        let response = self
            .execute(Method::POST, LOGIN, &ListQuery::new(), Some(&body), Auth::Anonymous)
            .await?;
        let tokens: LoginResponse = serde_json::from_value(response)
            .map_err(|e| ApiFailure::unexpected(format!("login response: {e}")))?;

        let pair = TokenPair {
            access: tokens.access,
            refresh: tokens.refresh,
        };
        self.credentials.set_tokens(pair.clone());
        tracing::info!(username, "signed in");
        Ok(pair)
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the server
    /// refuses the registration.
    pub async fn register(&self, form: &RegistrationForm) -> Result<Value, ApiFailure> {
        let body = form.submit()?;
        self.execute(Method::POST, REGISTER, &ListQuery::new(), Some(&body), Auth::Anonymous)
            .await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn profile(&self) -> Result<UserProfile, ApiFailure> {
        self.fetch(PROFILE).await
    }

    /// Replace profile fields with `changes`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn update_profile(&self, changes: &Value) -> Result<UserProfile, ApiFailure> {
        decode_record(&self.put(PROFILE, changes).await?)
    }

    /// Forget the session tokens.
    pub fn logout(&self) {
        self.credentials.clear();
        tracing::info!("signed out");
    }
}
