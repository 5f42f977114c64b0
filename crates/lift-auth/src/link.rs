//! Interpretation of what the user pastes back from the sign-in email.
//!
//! Three shapes are accepted:
//! - the one-time numeric code printed in the email (`123456`)
//! - the link itself (`.../auth/v1/verify?token=<hash>&type=magiclink&redirect_to=...`)
//! - the address the browser ended up on after following the link, which
//!   carries the session in its fragment (`...#access_token=...&refresh_token=...`)

use crate::error::AuthError;

/// Proof of mailbox ownership, ready to exchange for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInProof {
    /// One-time code from the email body; verified together with the address.
    Code(String),
    /// Hashed token from the emailed link.
    TokenHash { token_hash: String, kind: String },
    /// Session already issued by the auth server (post-redirect URL).
    Tokens {
        access_token: String,
        refresh_token: String,
        expires_in: i64,
    },
}

const MIN_CODE_LEN: usize = 6;
const MAX_CODE_LEN: usize = 10;

impl SignInProof {
    /// Classify pasted input.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidProof` if the input matches none of the
    /// accepted shapes or a URL lacks the expected parameters.
    pub fn parse(input: &str) -> Result<Self, AuthError> {
        let input = input.trim();

        if (MIN_CODE_LEN..=MAX_CODE_LEN).contains(&input.len())
            && input.chars().all(|c| c.is_ascii_digit())
        {
            return Ok(Self::Code(input.to_string()));
        }

        if !(input.starts_with("https://") || input.starts_with("http://")) {
            return Err(AuthError::InvalidProof(
                "expected the numeric code or the full link from the email".into(),
            ));
        }

        let (before_fragment, fragment) = input.split_once('#').unwrap_or((input, ""));

        let fragment_params = query_pairs(fragment)?;
        if let Some(access_token) = find(&fragment_params, "access_token") {
            let refresh_token = find(&fragment_params, "refresh_token").ok_or_else(|| {
                AuthError::InvalidProof("redirect URL has no refresh_token".into())
            })?;
            let expires_in = find(&fragment_params, "expires_in")
                .and_then(|value| value.parse::<i64>().ok())
                .unwrap_or(3600);
            return Ok(Self::Tokens {
                access_token: access_token.to_string(),
                refresh_token: refresh_token.to_string(),
                expires_in,
            });
        }

        if let Some(description) = find(&fragment_params, "error_description") {
            return Err(AuthError::InvalidProof(description.to_string()));
        }

        let query = before_fragment.split_once('?').map_or("", |(_, q)| q);
        let params = query_pairs(query)?;
        let token_hash = find(&params, "token_hash")
            .or_else(|| find(&params, "token"))
            .ok_or_else(|| AuthError::InvalidProof("link has no token".into()))?;
        let kind = find(&params, "type").unwrap_or("magiclink");

        Ok(Self::TokenHash {
            token_hash: token_hash.to_string(),
            kind: kind.to_string(),
        })
    }
}

fn query_pairs(query: &str) -> Result<Vec<(String, String)>, AuthError> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| {
            let value = urlencoding::decode(value)
                .map_err(|e| AuthError::InvalidProof(format!("URL decode: {e}")))?;
            Ok((key.to_string(), value.into_owned()))
        })
        .collect()
}

fn find<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .filter(|v| !v.is_empty())
}
