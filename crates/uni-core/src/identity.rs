use serde::{Deserialize, Serialize};

use crate::enums::UserType;

/// Lightweight authenticated user identity for cross-crate passing.
///
/// Produced by `uni-auth` from the access token claims, and refined from the
/// profile endpoint once it has been fetched. Contains only data fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    /// Backend user primary key (JWT `user_id` claim).
    pub user_id: Option<i64>,
    pub username: Option<String>,
    /// `None` until the profile has been fetched; tokens do not carry it.
    pub user_type: Option<UserType>,
}

impl AuthIdentity {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user_type == Some(UserType::Admin)
    }
}
