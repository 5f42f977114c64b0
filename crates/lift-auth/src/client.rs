//! HTTP client for a GoTrue-compatible auth API (`{url}/auth/v1`).

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use lift_config::RemoteConfig;
use serde::Deserialize;
use serde_json::json;

use crate::claims;
use crate::error::AuthError;
use crate::link::SignInProof;
use crate::session::Session;

/// Operations the identity provider needs from the auth server.
///
/// [`AuthClient`] talks HTTP; tests substitute an in-process fake.
pub trait AuthApi {
    /// Ask the server to email a sign-in link (and code) to `email`.
    fn request_link(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> impl Future<Output = Result<(), AuthError>> + Send;

    /// Exchange a pasted proof for a session.
    fn verify(
        &self,
        email: &str,
        proof: &SignInProof,
    ) -> impl Future<Output = Result<Session, AuthError>> + Send;

    /// Trade a refresh token for a fresh session.
    fn refresh(&self, refresh_token: &str)
    -> impl Future<Output = Result<Session, AuthError>> + Send;

    /// Revoke the session server-side.
    fn sign_out(&self, access_token: &str) -> impl Future<Output = Result<(), AuthError>> + Send;
}

/// Live auth API client.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    auth_url: String,
    anon_key: String,
}

impl AuthClient {
    /// Build a client for the configured project.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Other` if the remote section is not configured or
    /// the HTTP client cannot be built.
    pub fn new(config: &RemoteConfig) -> Result<Self, AuthError> {
        let config = config.require().map_err(|e| AuthError::Other(e.to_string()))?;
        let http = reqwest::Client::builder()
            .user_agent("liftlog/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AuthError::Other(format!("http client: {e}")))?;
        Ok(Self {
            http,
            auth_url: config.auth_url(),
            anon_key: config.anon_key.clone(),
        })
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(format!("{}{path}", self.auth_url))
            .header("apikey", &self.anon_key)
    }
}

impl AuthApi for AuthClient {
    async fn request_link(&self, email: &str, redirect_to: Option<&str>) -> Result<(), AuthError> {
        let path = match redirect_to {
            Some(url) => format!("/otp?redirect_to={}", urlencoding::encode(url)),
            None => "/otp".to_string(),
        };
        let resp = self
            .post(&path)
            .json(&json!({ "email": email, "create_user": true }))
            .send()
            .await
            .map_err(|e| AuthError::LinkDelivery(e.to_string()))?;
        check_response(resp).await.map_err(AuthError::LinkDelivery)?;
        tracing::debug!(email, "sign-in link requested");
        Ok(())
    }

    async fn verify(&self, email: &str, proof: &SignInProof) -> Result<Session, AuthError> {
        let body = match proof {
            SignInProof::Tokens {
                access_token,
                refresh_token,
                expires_in,
            } => {
                return build_session(
                    access_token.clone(),
                    refresh_token.clone(),
                    Some(*expires_in),
                    None,
                    None,
                );
            }
            SignInProof::Code(code) => json!({ "type": "email", "email": email, "token": code }),
            SignInProof::TokenHash { token_hash, kind } => {
                json!({ "type": kind, "token_hash": token_hash })
            }
        };
        let resp = self
            .post("/verify")
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Verification(e.to_string()))?;
        let resp = check_response(resp).await.map_err(AuthError::Verification)?;
        let parsed = resp
            .json::<SessionResponse>()
            .await
            .map_err(|e| AuthError::Verification(format!("parse session: {e}")))?;
        parsed.into_session()
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let resp = self
            .post("/token?grant_type=refresh_token")
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(|e| AuthError::RefreshFailed(e.to_string()))?;
        let resp = check_response(resp).await.map_err(AuthError::RefreshFailed)?;
        let parsed = resp
            .json::<SessionResponse>()
            .await
            .map_err(|e| AuthError::RefreshFailed(format!("parse session: {e}")))?;
        parsed.into_session()
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let resp = self
            .post("/logout")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Api(format!("logout: {e}")))?;
        check_response(resp).await.map_err(AuthError::Api)?;
        Ok(())
    }
}

/// Pass successful responses through; turn failures into the server's message.
///
/// GoTrue reports errors under varying keys depending on version
/// (`msg`, `error_description`, `message`, `error`).
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, String> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(format!("{}: {}", status.as_u16(), error_message(&body)))
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["msg", "error_description", "message", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.to_string())
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    user: Option<UserResponse>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl SessionResponse {
    fn into_session(self) -> Result<Session, AuthError> {
        build_session(
            self.access_token,
            self.refresh_token,
            self.expires_in,
            self.expires_at,
            self.user,
        )
    }
}

/// Assemble a `Session`, preferring explicit response fields over token claims.
fn build_session(
    access_token: String,
    refresh_token: String,
    expires_in: Option<i64>,
    expires_at: Option<i64>,
    user: Option<UserResponse>,
) -> Result<Session, AuthError> {
    let token_claims = claims::decode(&access_token).ok();

    let (user_id, email) = match (user, &token_claims) {
        (Some(user), _) => {
            let email = user
                .email
                .or_else(|| token_claims.as_ref().and_then(|c| c.email.clone()));
            (user.id, email)
        }
        (None, Some(c)) => (c.sub.clone(), c.email.clone()),
        (None, None) => {
            return Err(AuthError::Verification(
                "session carries neither a user nor a decodable access token".into(),
            ));
        }
    };

    let expires_at = expires_at
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .or_else(|| expires_in.map(|secs| Utc::now() + TimeDelta::seconds(secs)))
        .or_else(|| token_claims.as_ref().and_then(|c| c.expires_at().ok()))
        .ok_or_else(|| AuthError::Verification("session has no expiry".into()))?;

    Ok(Session {
        access_token,
        refresh_token,
        expires_at,
        user_id,
        email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::make_jwt;

    #[test]
    fn error_message_prefers_known_keys() {
        assert_eq!(
            error_message(r#"{"code":429,"msg":"Email rate limit exceeded"}"#),
            "Email rate limit exceeded"
        );
        assert_eq!(
            error_message(r#"{"error":"invalid_grant","error_description":"Token has expired"}"#),
            "Token has expired"
        );
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
    }

    #[test]
    fn session_response_with_user_object() {
        let raw = json!({
            "access_token": make_jwt("claim-user", Some("claim@x.de"), 1_900_000_000),
            "refresh_token": "r1",
            "expires_in": 3600,
            "expires_at": 1_900_000_000,
            "user": { "id": "user-9", "email": "lifter@example.de" }
        });
        let session = serde_json::from_value::<SessionResponse>(raw)
            .unwrap()
            .into_session()
            .unwrap();
        assert_eq!(session.user_id, "user-9");
        assert_eq!(session.email.as_deref(), Some("lifter@example.de"));
        assert_eq!(session.expires_at.timestamp(), 1_900_000_000);
    }

    #[test]
    fn session_falls_back_to_claims() {
        let session = build_session(
            make_jwt("claim-user", Some("claim@x.de"), 1_900_000_000),
            "r1".into(),
            None,
            None,
            None,
        )
        .unwrap();
        assert_eq!(session.user_id, "claim-user");
        assert_eq!(session.email.as_deref(), Some("claim@x.de"));
        assert_eq!(session.expires_at.timestamp(), 1_900_000_000);
    }

    #[test]
    fn session_without_identity_is_rejected() {
        let err = build_session("opaque".into(), "r1".into(), Some(60), None, None).unwrap_err();
        assert!(matches!(err, AuthError::Verification(_)));
    }

    #[test]
    fn new_requires_configured_remote() {
        assert!(AuthClient::new(&RemoteConfig::default()).is_err());
    }
}
