//! # uni-auth
//!
//! Session handling for UniDesk.
//!
//! Provides the [`CredentialProvider`] seam the API gateway depends on, an
//! in-memory implementation, an HTTP-refreshing [`SessionCredentials`],
//! OS keychain token storage (`keyring`) with env var and file fallbacks, and
//! unverified JWT claim decoding for expiry checks.

pub mod claims;
pub mod credentials;
pub mod error;
pub mod session;
pub mod token_store;

pub use claims::{TokenClaims, decode_expiry};
pub use credentials::{CredentialProvider, MemoryCredentials};
pub use error::AuthError;
pub use session::SessionCredentials;
pub use token_store::{TokenPair, TokenSource, TokenStore};

/// Clear stored credentials.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
pub fn logout(store: &TokenStore) -> Result<(), AuthError> {
    store.delete()
}
