use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use uni_config::AuthConfig;

use crate::error::AuthError;

const KEYRING_USER: &str = "session-tokens";
const ACCESS_ENV: &str = "UNIDESK_AUTH__ACCESS_TOKEN";
const REFRESH_ENV: &str = "UNIDESK_AUTH__REFRESH_TOKEN";

/// The two opaque strings a session consists of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

impl TokenPair {
    #[must_use]
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: Some(refresh.into()),
        }
    }

    fn is_empty(&self) -> bool {
        self.access.trim().is_empty()
    }
}

/// Where a loaded token pair came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Keyring,
    Env,
    File,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
        }
    }
}

/// Persistent token storage.
///
/// Load priority: OS keychain → `UNIDESK_AUTH__ACCESS_TOKEN` / `UNIDESK_AUTH__REFRESH_TOKEN`
/// env vars → JSON credentials file (`0600`). Stores go to the keychain and
/// fall back to the file when the keychain is unavailable.
#[derive(Debug, Clone)]
pub struct TokenStore {
    keyring_service: Option<String>,
    credentials_path: Option<PathBuf>,
}

impl TokenStore {
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            keyring_service: Some(config.keyring_service.clone()),
            credentials_path: config.credentials_path(),
        }
    }

    /// A store that never touches the OS keychain.
    #[must_use]
    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            keyring_service: None,
            credentials_path: Some(path.into()),
        }
    }

    /// Persist a token pair.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if both keyring and file storage fail.
    pub fn store(&self, tokens: &TokenPair) -> Result<(), AuthError> {
        let serialized = serde_json::to_string(tokens)
            .map_err(|e| AuthError::TokenStoreError(format!("serialize tokens: {e}")))?;

        let Some(entry) = self.keyring_entry() else {
            return self.store_file(&serialized);
        };
        match entry.set_password(&serialized) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                self.store_file(&serialized)
            }
        }
    }

    #[must_use]
    pub fn load(&self) -> Option<TokenPair> {
        self.load_with_source().map(|(tokens, _)| tokens)
    }

    /// Load a token pair and report which tier it came from.
    #[must_use]
    pub fn load_with_source(&self) -> Option<(TokenPair, TokenSource)> {
        if let Some(entry) = self.keyring_entry()
            && let Ok(raw) = entry.get_password()
            && let Some(tokens) = parse_pair(&raw)
        {
            return Some((tokens, TokenSource::Keyring));
        }

        if let Ok(access) = std::env::var(ACCESS_ENV)
            && !access.trim().is_empty()
        {
            let refresh = std::env::var(REFRESH_ENV)
                .ok()
                .filter(|r| !r.trim().is_empty());
            return Some((TokenPair { access, refresh }, TokenSource::Env));
        }

        self.load_file().map(|tokens| (tokens, TokenSource::File))
    }

    /// Delete stored credentials from keyring and file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
    pub fn delete(&self) -> Result<(), AuthError> {
        if let Some(entry) = self.keyring_entry() {
            let _ = entry.delete_credential();
        }

        if let Some(path) = &self.credentials_path
            && path.exists()
        {
            fs::remove_file(path).map_err(|e| {
                AuthError::TokenStoreError(format!("failed to delete {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }

    fn keyring_entry(&self) -> Option<keyring::Entry> {
        let service = self.keyring_service.as_deref()?;
        match keyring::Entry::new(service, KEYRING_USER) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(%error, "keyring unavailable");
                None
            }
        }
    }

    fn credentials_path(&self) -> Result<&Path, AuthError> {
        self.credentials_path.as_deref().ok_or_else(|| {
            AuthError::TokenStoreError("home directory not found, cannot store credentials".into())
        })
    }

    fn store_file(&self, serialized: &str) -> Result<(), AuthError> {
        let path = self.credentials_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(path, serialized)
            .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }

    fn load_file(&self) -> Option<TokenPair> {
        let path = self.credentials_path.as_deref()?;
        let raw = fs::read_to_string(path).ok()?;
        parse_pair(&raw)
    }
}

fn parse_pair(raw: &str) -> Option<TokenPair> {
    serde_json::from_str::<TokenPair>(raw)
        .ok()
        .filter(|tokens| !tokens.is_empty())
}
