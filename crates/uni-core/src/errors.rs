//! Cross-cutting error types for UniDesk.
//!
//! Domain-specific errors (`ConfigError`, `AuthError`, `ApiFailure`) live in their
//! respective crates. This module holds the errors any crate may raise while
//! handling core types.

use thiserror::Error;

/// Errors that can be raised by any UniDesk crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A vocabulary value was not one of the known variants.
    #[error("Unknown {vocabulary} value: {value}")]
    UnknownVariant { vocabulary: &'static str, value: String },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
