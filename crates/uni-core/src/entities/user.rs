use serde::{Deserialize, Serialize};

use crate::enums::UserType;
use crate::identity::AuthIdentity;
use crate::lenient;

/// The signed-in account, as returned by `accounts/profile/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient::opt_enum")]
    pub user_type: Option<UserType>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub phone: String,
}

impl UserProfile {
    #[must_use]
    pub fn full_name(&self) -> String {
        super::join_name(&self.first_name, &self.last_name)
    }

    #[must_use]
    pub fn identity(&self) -> AuthIdentity {
        AuthIdentity {
            user_id: self.id,
            username: Some(self.username.clone()).filter(|u| !u.is_empty()),
            user_type: self.user_type,
        }
    }
}
