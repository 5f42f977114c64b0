use anyhow::Context;
use lift_auth::{AuthClient, IdentityProvider, SessionStore};
use lift_config::LiftConfig;
use lift_core::OwnerIdentity;
use lift_store::{EntryStore, PersistentCache, RestRemote};
use tokio::sync::watch;

use crate::cli::GlobalFlags;
use crate::progress::SyncIndicator;

/// The entry store as the binary runs it: with the hosted table when one is
/// configured and reachable for this run, local-only otherwise.
pub type Store = EntryStore<Option<RestRemote>>;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: LiftConfig,
    pub store: Store,
    identity: Option<IdentityProvider>,
    identity_rx: Option<watch::Receiver<Option<OwnerIdentity>>>,
    offline: bool,
    _sync_indicator: SyncIndicator,
}

impl AppContext {
    /// Open the cache and build the remote clients. Nothing is fetched yet.
    pub fn init(config: LiftConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let cache_path = config.cache.resolve_path().context(
            "no user data directory for the cache; set LIFTLOG_CACHE__PATH or [cache] path",
        )?;

        let online = !flags.offline && config.remote.is_configured();
        if !flags.offline && !config.remote.is_configured() {
            tracing::debug!("remote not configured; running local-only");
        }

        let remote = if online {
            match RestRemote::new(&config.remote) {
                Ok(remote) => Some(remote),
                Err(error) => {
                    tracing::warn!(%error, "remote table unavailable; running local-only");
                    None
                }
            }
        } else {
            None
        };

        let identity = if online {
            match AuthClient::new(&config.remote) {
                Ok(client) => Some(IdentityProvider::new(
                    client,
                    SessionStore::new(&config.auth.keyring_service),
                    config.auth.redirect().map(str::to_string),
                )),
                Err(error) => {
                    tracing::warn!(%error, "auth API unavailable; running local-only");
                    None
                }
            }
        } else {
            None
        };
        let identity_rx = identity.as_ref().map(IdentityProvider::subscribe);

        let store = EntryStore::load(PersistentCache::new(cache_path), remote);
        let sync_indicator = SyncIndicator::watch(store.subscribe_sync());

        Ok(Self {
            config,
            store,
            identity,
            identity_rx,
            offline: flags.offline,
            _sync_indicator: sync_indicator,
        })
    }

    /// Start-of-run pass: pick up the stored session and reconcile the
    /// collection with the owner's rows.
    pub async fn connect(&mut self) -> anyhow::Result<()> {
        if let Some(provider) = self.identity.as_mut() {
            provider.restore().await;
        }
        self.apply_identity_changes().await
    }

    /// Hand the latest identity published by the provider to the store.
    pub async fn apply_identity_changes(&mut self) -> anyhow::Result<()> {
        let Some(rx) = self.identity_rx.as_mut() else {
            return Ok(());
        };
        if !rx.has_changed().unwrap_or(false) {
            return Ok(());
        }
        let identity = rx.borrow_and_update().clone();

        let token = self
            .identity
            .as_ref()
            .and_then(IdentityProvider::access_token)
            .map(str::to_string);
        if let Some(remote) = self.store.remote_mut() {
            remote.set_access_token(token);
        }

        self.store
            .on_identity_change(identity)
            .await
            .context("failed to reconcile entries with the remote")
    }

    /// The identity provider, or an explanation of why sign-in is unavailable.
    pub fn require_identity(&mut self) -> anyhow::Result<&mut IdentityProvider> {
        if self.offline {
            anyhow::bail!("sign-in is unavailable with --offline");
        }
        self.identity.as_mut().context(
            "sign-in needs a remote: set LIFTLOG_REMOTE__URL and LIFTLOG_REMOTE__ANON_KEY",
        )
    }
}
