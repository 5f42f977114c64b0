use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::AuthError;

/// The access-token claims liftlog cares about.
///
/// Decoded without signature verification: the token came straight from the
/// auth server over TLS, and the remote table re-verifies it on every request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Auth user ID.
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

impl TokenClaims {
    /// Expiry as a `DateTime`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Other` if `exp` is out of range.
    pub fn expires_at(&self) -> Result<DateTime<Utc>, AuthError> {
        DateTime::from_timestamp(self.exp, 0)
            .ok_or_else(|| AuthError::Other("invalid exp timestamp".into()))
    }
}

/// Decode the payload segment of a JWT.
///
/// # Errors
///
/// Returns `AuthError::Other` if the JWT format is invalid or required claims
/// are missing.
pub fn decode(jwt: &str) -> Result<TokenClaims, AuthError> {
    let mut parts = jwt.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(AuthError::Other("invalid JWT format".into()));
    };
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| AuthError::Other(format!("base64 decode failed: {e}")))?;
    serde_json::from_slice(&bytes).map_err(|e| AuthError::Other(format!("JSON parse failed: {e}")))
}

#[cfg(test)]
pub(crate) fn make_jwt(sub: &str, email: Option<&str>, exp: i64) -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let header = engine.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = match email {
        Some(email) => serde_json::json!({ "sub": sub, "email": email, "exp": exp }),
        None => serde_json::json!({ "sub": sub, "exp": exp }),
    };
    let payload = engine.encode(payload.to_string());
    let signature = engine.encode("fake_sig");
    format!("{header}.{payload}.{signature}")
}
