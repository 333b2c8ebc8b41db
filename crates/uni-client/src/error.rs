//! Gateway failure type.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use uni_forms::ValidationErrors;

pub const NETWORK_ERROR: &str = "Impossible de se connecter au serveur";
pub const NO_RESPONSE: &str = "Pas de réponse du serveur";
pub const SERVER_ERROR: &str = "Erreur serveur";
pub const VALIDATION_FAILED: &str = "Validation échouée";
pub const UNEXPECTED_RESPONSE: &str = "Réponse inattendue du serveur";

/// A failed gateway call, shaped for display.
///
/// `error` is a short headline; `detail` carries whatever explanation the
/// backend gave (a string, or its field-error object); `errors` keeps
/// field-level messages so forms can show them next to the offending input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Error)]
#[error("{error}")]
pub struct ApiFailure {
    pub error: String,
    pub detail: Option<Value>,
    /// HTTP status when the server answered.
    pub status: Option<u16>,
    pub errors: Option<Value>,
    pub is_network_error: bool,
    pub validation_error: bool,
}

impl ApiFailure {
    /// The request never got an HTTP response.
    #[must_use]
    pub fn transport(error: &reqwest::Error) -> Self {
        let headline = if error.is_timeout() {
            NO_RESPONSE
        } else if error.is_connect() || error.is_request() {
            NETWORK_ERROR
        } else {
            UNEXPECTED_RESPONSE
        };
        Self {
            error: headline.to_string(),
            detail: Some(Value::String(error.to_string())),
            is_network_error: error.is_connect() || error.is_timeout() || error.is_request(),
            ..Self::default()
        }
    }

    /// The server answered with an error status, or with `success: false`.
    ///
    /// `error` and `detail` come from the body when present. A body with no
    /// `errors` key whose values are message lists (`{"email": ["..."]}`) is
    /// treated as field errors.
    #[must_use]
    pub fn from_response(status: u16, body: Option<&Value>) -> Self {
        let field = |name: &str| body.and_then(|b| b.get(name)).filter(|v| !v.is_null());

        let error = field("error")
            .and_then(Value::as_str)
            .unwrap_or(SERVER_ERROR)
            .to_string();
        let errors = field("errors")
            .cloned()
            .or_else(|| body.filter(|b| is_field_error_map(b)).cloned());
        let detail = field("detail")
            .or_else(|| field("errors"))
            .or_else(|| field("message"))
            .cloned()
            .or_else(|| errors.clone())
            .or_else(|| Some(Value::String(format!("HTTP {status}"))));

        Self {
            error,
            detail,
            status: Some(status),
            errors,
            ..Self::default()
        }
    }

    /// A form was submitted without passing its own validation.
    #[must_use]
    pub fn validation(errors: &ValidationErrors) -> Self {
        Self {
            error: VALIDATION_FAILED.to_string(),
            detail: Some(Value::String(errors.to_string())),
            errors: serde_json::to_value(errors).ok(),
            validation_error: true,
            ..Self::default()
        }
    }

    /// The response body did not hold what the call expected.
    #[must_use]
    pub fn unexpected(detail: impl Into<String>) -> Self {
        Self {
            error: UNEXPECTED_RESPONSE.to_string(),
            detail: Some(Value::String(detail.into())),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    /// `detail` as display text.
    #[must_use]
    pub fn detail_text(&self) -> Option<String> {
        self.detail.as_ref().map(|d| match d {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// One message per field, list values joined with `"; "`.
    #[must_use]
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        let Some(Value::Object(map)) = &self.errors else {
            return BTreeMap::new();
        };
        map.iter()
            .map(|(field, messages)| {
                let text = match messages {
                    Value::String(s) => s.clone(),
                    Value::Array(items) => items
                        .iter()
                        .map(|m| m.as_str().map_or_else(|| m.to_string(), str::to_string))
                        .collect::<Vec<_>>()
                        .join("; "),
                    other => other.to_string(),
                };
                (field.clone(), text)
            })
            .collect()
    }
}

impl From<ValidationErrors> for ApiFailure {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation(&errors)
    }
}

/// `{"field": ["msg", ...], ...}` as produced by serializer validation.
fn is_field_error_map(body: &Value) -> bool {
    body.as_object().is_some_and(|map| {
        !map.is_empty()
            && map
                .values()
                .all(|v| v.as_array().is_some_and(|items| items.iter().all(Value::is_string)))
    })
}
