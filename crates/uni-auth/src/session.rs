use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use uni_config::ApiConfig;
use uni_core::identity::AuthIdentity;

use crate::claims::TokenClaims;
use crate::credentials::{CredentialProvider, MemoryCredentials};
use crate::error::AuthError;
use crate::token_store::{TokenPair, TokenStore};

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

/// A signed-in session that refreshes its access token over HTTP.
///
/// Refresh posts `{ "refresh": <token> }` to the configured refresh endpoint
/// and expects `{ "access": <token> }` back (a rotated `refresh` is kept when
/// present). Token changes are mirrored to the [`TokenStore`] when one is
/// attached.
#[derive(Debug)]
pub struct SessionCredentials {
    http: reqwest::Client,
    refresh_url: String,
    tokens: MemoryCredentials,
    store: Option<TokenStore>,
}

impl SessionCredentials {
    /// # Errors
    ///
    /// Returns `AuthError::Http` if the HTTP client cannot be built.
    pub fn new(api: &ApiConfig) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .user_agent(&api.user_agent)
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()
            .map_err(|e| AuthError::Http(e.to_string()))?;

        Ok(Self {
            http,
            refresh_url: api.refresh_url(),
            tokens: MemoryCredentials::default(),
            store: None,
        })
    }

    /// Build a session and resume whatever tokens the store holds.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Http` if the HTTP client cannot be built.
    pub fn restore(api: &ApiConfig, store: TokenStore) -> Result<Self, AuthError> {
        let mut session = Self::new(api)?;
        if let Some((tokens, source)) = store.load_with_source() {
            tracing::debug!(source = source.as_str(), "resumed stored session");
            session.tokens.set_tokens(tokens);
        }
        session.store = Some(store);
        Ok(session)
    }

    #[must_use]
    pub fn tokens(&self) -> Option<TokenPair> {
        self.tokens.tokens()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens.access_token().is_some()
    }

    /// Who the current access token belongs to, if it can be decoded.
    #[must_use]
    pub fn identity(&self) -> Option<AuthIdentity> {
        let access = self.tokens.access_token()?;
        TokenClaims::decode(&access)
            .ok()
            .map(|claims| claims.to_identity())
    }

    fn persist(&self) {
        let Some(store) = &self.store else { return };
        let result = match self.tokens.tokens() {
            Some(tokens) => store.store(&tokens),
            None => store.delete(),
        };
        if let Err(error) = result {
            tracing::warn!(%error, "failed to persist session tokens");
        }
    }
}

impl CredentialProvider for SessionCredentials {
    fn access_token(&self) -> Option<String> {
        self.tokens.access_token()
    }

    fn set_tokens(&self, tokens: TokenPair) {
        self.tokens.set_tokens(tokens);
        self.persist();
    }

    async fn refresh(&self) -> Result<String, AuthError> {
        let refresh = self
            .tokens
            .refresh_token()
            .ok_or(AuthError::NotAuthenticated)?;

        tracing::debug!(endpoint = %self.refresh_url, "refreshing access token");
        let response = self
            .http
            .post(&self.refresh_url)
            .json(&json!({ "refresh": refresh }))
            .send()
            .await
            .map_err(|e| AuthError::RefreshFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "token refresh rejected");
            return Err(AuthError::RefreshRejected {
                status: status.as_u16(),
            });
        }

        let body: RefreshResponse = response
            .json()
            .await
            .map_err(|e| AuthError::RefreshFailed(format!("unexpected refresh body: {e}")))?;

        self.tokens.update_access(body.access.clone(), body.refresh);
        self.persist();
        Ok(body.access)
    }

    fn clear(&self) {
        self.tokens.clear();
        self.persist();
    }
}
