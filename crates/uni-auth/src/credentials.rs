use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::AuthError;
use crate::token_store::TokenPair;

/// Source of bearer tokens for the API gateway.
///
/// The gateway asks for the current access token on every request, calls
/// [`refresh`](CredentialProvider::refresh) once after a `401`, and calls
/// [`clear`](CredentialProvider::clear) when the session cannot be recovered.
pub trait CredentialProvider: Send + Sync {
    /// The current access token, if signed in.
    fn access_token(&self) -> Option<String>;

    /// Replace the session tokens (after login).
    fn set_tokens(&self, tokens: TokenPair);

    /// Obtain a new access token. On success the new token is also returned by
    /// subsequent [`access_token`](CredentialProvider::access_token) calls.
    fn refresh(&self) -> impl Future<Output = Result<String, AuthError>> + Send;

    /// Forget every token.
    fn clear(&self);
}

impl<C: CredentialProvider> CredentialProvider for Arc<C> {
    fn access_token(&self) -> Option<String> {
        (**self).access_token()
    }

    fn set_tokens(&self, tokens: TokenPair) {
        (**self).set_tokens(tokens);
    }

    fn refresh(&self) -> impl Future<Output = Result<String, AuthError>> + Send {
        (**self).refresh()
    }

    fn clear(&self) {
        (**self).clear();
    }
}

/// Tokens held in process memory, with no way to refresh them.
///
/// Useful for scripts handed a token out of band. A `401` with these
/// credentials clears them and surfaces the failure.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    tokens: RwLock<Option<TokenPair>>,
}

impl MemoryCredentials {
    #[must_use]
    pub fn new(tokens: Option<TokenPair>) -> Self {
        Self {
            tokens: RwLock::new(tokens),
        }
    }

    #[must_use]
    pub fn tokens(&self) -> Option<TokenPair> {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.tokens().and_then(|t| t.refresh)
    }

    /// Swap in a new access token, keeping the refresh token.
    ///
    /// A rotated refresh token replaces the old one when given.
    pub fn update_access(&self, access: String, rotated_refresh: Option<String>) {
        let mut guard = self.tokens.write().unwrap_or_else(PoisonError::into_inner);
        let refresh = rotated_refresh.or_else(|| guard.as_ref().and_then(|t| t.refresh.clone()));
        *guard = Some(TokenPair { access, refresh });
    }
}

impl CredentialProvider for MemoryCredentials {
    fn access_token(&self) -> Option<String> {
        self.tokens().map(|t| t.access)
    }

    fn set_tokens(&self, tokens: TokenPair) {
        *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = Some(tokens);
    }

    async fn refresh(&self) -> Result<String, AuthError> {
        Err(AuthError::NotAuthenticated)
    }

    fn clear(&self) {
        *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
