use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uni_core::identity::AuthIdentity;
use uni_core::lenient::parse_id;

use crate::error::AuthError;

/// Claims read from an access token payload.
///
/// The payload is decoded without signature verification; the backend remains
/// the authority on whether a token is valid. This is only used for expiry
/// checks and to know which user is signed in.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    /// `user_id` claim.
    pub user_id: Option<i64>,
    /// `token_type` claim (`access` or `refresh`).
    pub token_type: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl TokenClaims {
    /// Decode the payload segment of a JWT.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the JWT format is invalid or the `exp`
    /// claim is missing or cannot be parsed.
    pub fn decode(jwt: &str) -> Result<Self, AuthError> {
        let payload = decode_payload(jwt)?;
        let exp = payload["exp"]
            .as_i64()
            .ok_or_else(|| AuthError::InvalidToken("missing exp claim".into()))?;
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| AuthError::InvalidToken("invalid exp timestamp".into()))?;

        Ok(Self {
            user_id: payload.get("user_id").and_then(parse_id),
            token_type: payload["token_type"].as_str().map(str::to_string),
            expires_at,
        })
    }

    /// Identity as far as the token knows it. `user_type` needs the profile.
    #[must_use]
    pub fn to_identity(&self) -> AuthIdentity {
        AuthIdentity {
            user_id: self.user_id,
            username: None,
            user_type: None,
        }
    }

    /// Check if the token is expired or expires within `buffer_secs`.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        let threshold = Utc::now() + chrono::TimeDelta::seconds(buffer_secs);
        self.expires_at <= threshold
    }
}

/// Decode the JWT `exp` claim without verifying the signature.
///
/// # Errors
///
/// Same as [`TokenClaims::decode`].
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    TokenClaims::decode(jwt).map(|claims| claims.expires_at)
}

fn decode_payload(jwt: &str) -> Result<Value, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::InvalidToken("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| AuthError::InvalidToken(format!("base64 decode failed: {e}")))?;
    serde_json::from_slice(&payload)
        .map_err(|e| AuthError::InvalidToken(format!("JSON parse failed: {e}")))
}

#[cfg(test)]
pub(crate) fn make_jwt(payload: &str) -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let header = engine.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = engine.encode(payload);
    let signature = engine.encode("fake_sig");
    format!("{header}.{payload}.{signature}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_with_exp(exp: i64) -> String {
        make_jwt(&format!(
            r#"{{"token_type":"access","exp":{exp},"jti":"abc","user_id":7}}"#
        ))
    }

    #[test]
    fn decode_reads_user_and_expiry() {
        let exp = Utc::now().timestamp() + 3600;
        let claims = TokenClaims::decode(&jwt_with_exp(exp)).expect("decode");
        assert_eq!(claims.user_id, Some(7));
        assert_eq!(claims.token_type.as_deref(), Some("access"));
        assert_eq!(claims.expires_at.timestamp(), exp);
        assert_eq!(claims.to_identity().user_id, Some(7));
    }

    #[test]
    fn string_user_id_is_accepted() {
        let jwt = make_jwt(r#"{"exp":4102444800,"user_id":"42"}"#);
        let claims = TokenClaims::decode(&jwt).expect("decode");
        assert_eq!(claims.user_id, Some(42));
    }

    #[test]
    fn decode_expiry_expired_jwt() {
        let past = Utc::now().timestamp() - 3600;
        let dt = decode_expiry(&jwt_with_exp(past)).expect("decode");
        assert!(dt < Utc::now());
    }

    #[test]
    fn decode_expiry_invalid_format() {
        let err = decode_expiry("not-a-jwt").unwrap_err();
        assert!(err.to_string().contains("invalid JWT format"));
    }

    #[test]
    fn decode_expiry_missing_exp_claim() {
        let err = decode_expiry(&make_jwt(r#"{"user_id":1}"#)).unwrap_err();
        assert!(err.to_string().contains("missing exp claim"));
    }

    #[test]
    fn decode_expiry_bad_base64() {
        let err = decode_expiry("header.!!!invalid!!!.signature").unwrap_err();
        assert!(err.to_string().contains("base64 decode failed"));
    }

    #[test]
    fn near_expiry_window() {
        let soon = TokenClaims::decode(&jwt_with_exp(Utc::now().timestamp() + 30)).expect("decode");
        assert!(soon.is_near_expiry(60));
        let later =
            TokenClaims::decode(&jwt_with_exp(Utc::now().timestamp() + 600)).expect("decode");
        assert!(!later.is_near_expiry(60));
    }
}
