use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated: no refresh token available")]
    NotAuthenticated,

    #[error("token refresh rejected by server (status {status})")]
    RefreshRejected { status: u16 },

    #[error("token refresh failed: {0}")]
    RefreshFailed(String),

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("http client error: {0}")]
    Http(String),
}
