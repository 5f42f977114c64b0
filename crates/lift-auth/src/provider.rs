//! The signed-in owner, with change notifications.

use lift_core::OwnerIdentity;
use tokio::sync::watch;

use crate::client::{AuthApi, AuthClient};
use crate::error::AuthError;
use crate::link::SignInProof;
use crate::session::Session;
use crate::session_store::SessionStore;

/// Refresh sessions expiring within this many seconds.
const REFRESH_BUFFER_SECS: i64 = 60;

/// Supplies the optional owner identity and tells subscribers when it changes.
///
/// Every transition (restore, sign-in, sign-out, lost session) is published
/// on a `watch` channel; the entry store reconciles on each new value.
pub struct IdentityProvider<A: AuthApi = AuthClient> {
    api: A,
    store: SessionStore,
    redirect_url: Option<String>,
    session: Option<Session>,
    tx: watch::Sender<Option<OwnerIdentity>>,
}

impl<A: AuthApi> IdentityProvider<A> {
    #[must_use]
    pub fn new(api: A, store: SessionStore, redirect_url: Option<String>) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            api,
            store,
            redirect_url,
            session: None,
            tx,
        }
    }

    /// Pick up the session left by a previous run, refreshing it if it is
    /// about to expire.
    ///
    /// A session that cannot be refreshed and has already expired is
    /// discarded; one that is merely close to expiry is kept for this run.
    pub async fn restore(&mut self) -> Option<OwnerIdentity> {
        let Some(stored) = self.store.load() else {
            tracing::debug!("no stored session");
            self.publish(None);
            return None;
        };

        let session = if stored.is_near_expiry(REFRESH_BUFFER_SECS) {
            match self.api.refresh(&stored.refresh_token).await {
                Ok(fresh) => {
                    if let Err(error) = self.store.save(&fresh) {
                        tracing::warn!(%error, "could not persist refreshed session");
                    }
                    Some(fresh)
                }
                Err(error) if stored.is_near_expiry(0) => {
                    tracing::warn!(%error, "session expired and refresh failed; signing out locally");
                    if let Err(error) = self.store.clear() {
                        tracing::warn!(%error, "could not remove stale session");
                    }
                    None
                }
                Err(error) => {
                    tracing::warn!(%error, "session refresh failed; using current token");
                    Some(stored)
                }
            }
        } else {
            Some(stored)
        };

        let identity = session.as_ref().map(Session::identity);
        self.session = session;
        self.publish(identity.clone());
        identity
    }

    /// The active session, if signed in.
    #[must_use]
    pub const fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn identity(&self) -> Option<OwnerIdentity> {
        self.session.as_ref().map(Session::identity)
    }

    /// Bearer token for the remote table.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.access_token.as_str())
    }

    /// Receive every identity transition from now on.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<OwnerIdentity>> {
        self.tx.subscribe()
    }

    /// Where the stored session lives (`keyring` or `file`).
    #[must_use]
    pub fn session_source(&self) -> Option<&'static str> {
        self.store.source()
    }

    /// Email a sign-in link to `email`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::LinkDelivery` for a malformed address or when the
    /// auth server refuses to send; the message is meant for the user.
    pub async fn request_link(&self, email: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::LinkDelivery(format!(
                "`{email}` is not an email address"
            )));
        }
        self.api
            .request_link(email, self.redirect_url.as_deref())
            .await
    }

    /// Finish sign-in with the code or link pasted from the email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidProof` for unrecognized input,
    /// `AuthError::Verification` if the server rejects it, or
    /// `AuthError::SessionStoreError` if the session cannot be persisted.
    pub async fn complete_sign_in(
        &mut self,
        email: &str,
        pasted: &str,
    ) -> Result<OwnerIdentity, AuthError> {
        let proof = SignInProof::parse(pasted)?;
        let session = self.api.verify(email.trim(), &proof).await?;
        self.store.save(&session)?;

        let identity = session.identity();
        tracing::debug!(user_id = %identity.user_id, "signed in");
        self.session = Some(session);
        self.publish(Some(identity.clone()));
        Ok(identity)
    }

    /// Sign out: revoke server-side (best effort), forget the local session,
    /// and publish the absent owner.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStoreError` if the stored session cannot be
    /// removed.
    pub async fn sign_out(&mut self) -> Result<(), AuthError> {
        let session = self.session.take().or_else(|| self.store.load());
        if let Some(session) = session
            && let Err(error) = self.api.sign_out(&session.access_token).await
        {
            tracing::warn!(%error, "server-side sign-out failed; removing local session anyway");
        }
        self.store.clear()?;
        self.publish(None);
        Ok(())
    }

    fn publish(&self, identity: Option<OwnerIdentity>) {
        self.tx.send_replace(identity);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::{TimeDelta, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Clone, Default)]
    struct FakeAuth {
        calls: Arc<Mutex<Vec<String>>>,
        fail_refresh: bool,
        fail_sign_out: bool,
    }

    fn session(user: &str, expires_in: TimeDelta) -> Session {
        Session {
            access_token: format!("access-{user}"),
            refresh_token: format!("refresh-{user}"),
            expires_at: Utc::now() + expires_in,
            user_id: user.to_string(),
            email: Some(format!("{user}@example.de")),
        }
    }

    impl FakeAuth {
        fn log(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl AuthApi for FakeAuth {
        async fn request_link(&self, email: &str, redirect_to: Option<&str>) -> Result<(), AuthError> {
            self.log(format!("link {email} {redirect_to:?}"));
            Ok(())
        }

        async fn verify(&self, email: &str, proof: &SignInProof) -> Result<Session, AuthError> {
            self.log(format!("verify {email}"));
            match proof {
                SignInProof::Code(code) if code == "123456" => {
                    Ok(session("user-1", TimeDelta::hours(1)))
                }
                _ => Err(AuthError::Verification("Token has expired or is invalid".into())),
            }
        }

        async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
            self.log(format!("refresh {refresh_token}"));
            if self.fail_refresh {
                Err(AuthError::RefreshFailed("offline".into()))
            } else {
                Ok(session("user-1", TimeDelta::hours(1)))
            }
        }

        async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
            self.log(format!("logout {access_token}"));
            if self.fail_sign_out {
                Err(AuthError::Api("offline".into()))
            } else {
                Ok(())
            }
        }
    }

    fn provider(api: FakeAuth, dir: &tempfile::TempDir) -> IdentityProvider<FakeAuth> {
        let store = SessionStore::file_only(dir.path().join("session.json"));
        IdentityProvider::new(api, store, Some("http://localhost/done".into()))
    }

    #[tokio::test]
    async fn restore_without_session_is_absent() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut provider = provider(FakeAuth::default(), &dir);
        assert_eq!(provider.restore().await, None);
        assert!(provider.access_token().is_none());
    }

    #[tokio::test]
    async fn sign_in_persists_and_notifies() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut provider = provider(FakeAuth::default(), &dir);
        let mut rx = provider.subscribe();

        let identity = provider
            .complete_sign_in("user-1@example.de", "123456")
            .await
            .unwrap();
        assert_eq!(identity.user_id, "user-1");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().clone(), Some(identity.clone()));

        let mut again = self::provider(FakeAuth::default(), &dir);
        assert_eq!(again.restore().await, Some(identity));
    }

    #[tokio::test]
    async fn rejected_code_leaves_signed_out() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut provider = provider(FakeAuth::default(), &dir);
        let err = provider
            .complete_sign_in("user-1@example.de", "999999")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Verification(_)));
        assert!(provider.current().is_none());
    }

    #[tokio::test]
    async fn request_link_rejects_malformed_email() {
        let dir = tempfile::TempDir::new().unwrap();
        let api = FakeAuth::default();
        let provider = provider(api.clone(), &dir);

        assert!(matches!(
            provider.request_link("  ").await,
            Err(AuthError::LinkDelivery(_))
        ));
        provider.request_link("lifter@example.de").await.unwrap();
        assert_eq!(
            api.calls(),
            vec![r#"link lifter@example.de Some("http://localhost/done")"#.to_string()]
        );
    }

    #[tokio::test]
    async fn restore_refreshes_near_expiry() {
        let dir = tempfile::TempDir::new().unwrap();
        let api = FakeAuth::default();
        let mut provider = provider(api.clone(), &dir);
        provider
            .store
            .save(&session("user-1", TimeDelta::seconds(10)))
            .unwrap();

        provider.restore().await.unwrap();
        assert_eq!(api.calls(), vec!["refresh refresh-user-1".to_string()]);
        assert!(!provider.current().unwrap().is_near_expiry(REFRESH_BUFFER_SECS));
    }

    #[tokio::test]
    async fn restore_drops_expired_session_when_refresh_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let api = FakeAuth {
            fail_refresh: true,
            ..FakeAuth::default()
        };
        let mut provider = provider(api, &dir);
        provider
            .store
            .save(&session("user-1", TimeDelta::seconds(-10)))
            .unwrap();

        assert_eq!(provider.restore().await, None);
        assert!(provider.store.load().is_none());
    }

    #[tokio::test]
    async fn restore_keeps_unexpired_session_when_refresh_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let api = FakeAuth {
            fail_refresh: true,
            ..FakeAuth::default()
        };
        let mut provider = provider(api, &dir);
        provider
            .store
            .save(&session("user-1", TimeDelta::seconds(30)))
            .unwrap();

        assert!(provider.restore().await.is_some());
    }

    #[tokio::test]
    async fn sign_out_clears_even_if_server_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let api = FakeAuth {
            fail_sign_out: true,
            ..FakeAuth::default()
        };
        let mut provider = provider(api.clone(), &dir);
        provider
            .complete_sign_in("user-1@example.de", "123456")
            .await
            .unwrap();
        let rx = provider.subscribe();

        provider.sign_out().await.unwrap();
        assert!(provider.current().is_none());
        assert!(provider.store.load().is_none());
        assert_eq!(*rx.borrow(), None);
        assert!(api.calls().contains(&"logout access-user-1".to_string()));
    }
}
