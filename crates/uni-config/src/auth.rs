//! Credential storage settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_keyring_service() -> String {
    "unidesk".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Service name under which tokens are stored in the OS keychain.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Directory holding the fallback `credentials` file. Empty means `~/.unidesk`.
    #[serde(default)]
    pub credentials_dir: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            keyring_service: default_keyring_service(),
            credentials_dir: String::new(),
        }
    }
}

impl AuthConfig {
    /// Path of the fallback credentials file.
    pub fn credentials_path(&self) -> Option<PathBuf> {
        if self.credentials_dir.is_empty() {
            dirs::home_dir().map(|h| h.join(".unidesk").join("credentials"))
        } else {
            Some(PathBuf::from(&self.credentials_dir).join("credentials"))
        }
    }
}
