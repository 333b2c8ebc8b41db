use serde_json::{Map, Value, json};
use uni_core::enums::UserType;

use crate::controller::FormController;
use crate::draft::{Draft, object};
use crate::error::ValidationErrors;
use crate::rules::Checks;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Account sign-up. Passwords are sent exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    draft: Draft,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            draft: Draft::with_initial([("user_type", UserType::Student.as_str())]),
        }
    }
}

impl FormController for RegistrationForm {
    const ENTITY: &'static str = "account";

    fn draft(&self) -> &Draft {
        &self.draft
    }

    fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let d = &self.draft;
        Checks::new(d)
            .required("username", "Le nom d'utilisateur est requis")
            .required("email", "L'email est requis")
            .email("email")
            .check(
                d.raw("password").chars().count() >= MIN_PASSWORD_LEN,
                "password",
                "Le mot de passe doit contenir au moins 8 caractères.",
            )
            .check(
                d.raw("password") == d.raw("password2"),
                "password2",
                "Les mots de passe ne correspondent pas.",
            )
            .choice::<UserType>("user_type", "Type d'utilisateur inconnu")
            .finish()
    }

    fn payload(&self) -> Map<String, Value> {
        let d = &self.draft;
        object(json!({
            "username": d.text_value("username"),
            "email": d.text_value("email"),
            "password": d.raw("password"),
            "password2": d.raw("password2"),
            "first_name": d.text_value("first_name"),
            "last_name": d.text_value("last_name"),
            "user_type": d.text_value("user_type"),
        }))
    }
}
