//! The entry store: local collection, cache persistence, reconciliation.
//!
//! Every mutation is applied locally and persisted first. When an owner is
//! present the store then writes to the remote and, for add and import,
//! replaces the local collection with a fresh fetch. Remote failures are
//! logged and leave the local state standing.

use std::future::Future;

use lift_core::entry::{normalize, sort_by_date};
use lift_core::ids::{PREFIX_ENTRY, generate_unique_id};
use lift_core::parse::{is_blank, parse_reps, parse_weight};
use lift_core::{Entry, OwnerIdentity};
use tokio::sync::watch;

use crate::cache::{CacheDocument, PersistentCache};
use crate::error::{RemoteError, StoreError};
use crate::import_export::{Export, parse_import};
use crate::remote::RemoteStore;

/// Explicit user answer to "delete everything?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

/// Whether a remote round-trip is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Idle,
    Syncing,
}

pub struct EntryStore<R: RemoteStore> {
    cache: PersistentCache,
    remote: R,
    entries: Vec<Entry>,
    first_sync_done: bool,
    owner: Option<OwnerIdentity>,
    sync: watch::Sender<SyncState>,
}

impl<R: RemoteStore> EntryStore<R> {
    /// Open the store from its cache. Never fails: an unreadable cache starts
    /// empty.
    pub fn load(cache: PersistentCache, remote: R) -> Self {
        let CacheDocument {
            entries,
            first_sync_done,
        } = cache.load();
        let entries = normalize(entries);
        tracing::debug!(count = entries.len(), first_sync_done, "loaded cache");
        let (sync, _rx) = watch::channel(SyncState::Idle);
        Self {
            cache,
            remote,
            entries,
            first_sync_done,
            owner: None,
            sync,
        }
    }

    /// Current collection, ascending by date.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub const fn owner(&self) -> Option<&OwnerIdentity> {
        self.owner.as_ref()
    }

    #[must_use]
    pub const fn first_sync_done(&self) -> bool {
        self.first_sync_done
    }

    #[must_use]
    pub fn sync_state(&self) -> SyncState {
        *self.sync.borrow()
    }

    /// Follow sync state changes, e.g. to drive a spinner.
    #[must_use]
    pub fn subscribe_sync(&self) -> watch::Receiver<SyncState> {
        self.sync.subscribe()
    }

    #[must_use]
    pub const fn remote(&self) -> &R {
        &self.remote
    }

    pub const fn remote_mut(&mut self) -> &mut R {
        &mut self.remote
    }

    /// React to an identity transition.
    ///
    /// A new owner triggers the one-time push of a local-only collection
    /// (unless it is empty or was pushed before) and then a full fetch that
    /// replaces the local collection. If that push fails, the fetch is skipped
    /// and the local collection stands. An absent owner only switches the
    /// store to local-only operation.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cache cannot be written.
    pub async fn on_identity_change(
        &mut self,
        identity: Option<OwnerIdentity>,
    ) -> Result<(), StoreError> {
        let Some(identity) = identity else {
            if self.owner.take().is_some() {
                tracing::debug!("owner signed out; continuing local-only");
            }
            return Ok(());
        };

        let owner = identity.user_id.clone();
        self.owner = Some(identity);

        if !self.first_sync_done && !self.first_sync(&owner).await? {
            // the local-only entries never reached the remote; a fetch now
            // would replace them
            return Ok(());
        }
        self.reload_from_remote(&owner).await
    }

    /// Push the local-only collection once. Returns whether the marker was
    /// set; `false` leaves it for the next sign-in.
    async fn first_sync(&mut self, owner: &str) -> Result<bool, StoreError> {
        if self.entries.is_empty() {
            tracing::debug!("first sign-in with an empty collection; nothing to push");
        } else {
            let pushed = self
                .remote_call("first-sync upsert", self.remote.upsert(owner, &self.entries))
                .await;
            if pushed.is_none() {
                return Ok(false);
            }
            tracing::debug!(count = self.entries.len(), "pushed local-only entries");
        }
        self.first_sync_done = true;
        self.persist()?;
        Ok(true)
    }

    /// Re-fetch the owner's rows without changing anything locally first.
    /// Returns whether a fetch was attempted.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cache cannot be written.
    pub async fn refresh(&mut self) -> Result<bool, StoreError> {
        let Some(owner) = self.owner_id() else {
            return Ok(false);
        };
        self.reload_from_remote(&owner).await?;
        Ok(true)
    }

    /// Record a new entry from user-typed text.
    ///
    /// Returns `None` (and changes nothing) when the exercise or date is
    /// blank or the weight does not parse.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if an id cannot be generated or the cache cannot
    /// be written.
    pub async fn add(
        &mut self,
        exercise: &str,
        date: &str,
        weight_text: &str,
        reps_text: &str,
    ) -> Result<Option<Entry>, StoreError> {
        if is_blank(exercise) || is_blank(date) {
            return Ok(None);
        }
        let Some(weight) = parse_weight(weight_text) else {
            return Ok(None);
        };

        let id = generate_unique_id(PREFIX_ENTRY, |candidate| {
            self.entries.iter().any(|e| e.id == candidate)
        })?;
        let entry = Entry {
            id,
            date: date.trim().to_string(),
            exercise: exercise.trim().to_string(),
            weight,
            reps: parse_reps(reps_text),
        };

        self.entries.push(entry.clone());
        sort_by_date(&mut self.entries);
        self.persist()?;
        tracing::debug!(id = %entry.id, "added entry");

        if let Some(owner) = self.owner_id() {
            let upserted = self
                .remote_call("upsert", self.remote.upsert(&owner, std::slice::from_ref(&entry)))
                .await;
            if upserted.is_some() {
                self.reload_from_remote(&owner).await?;
            }
        }
        Ok(Some(entry))
    }

    /// Remove the entry with `id`. Returns whether a local entry was removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cache cannot be written.
    pub async fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.persist()?;
            tracing::debug!(id, "deleted entry");
        }

        if let Some(owner) = self.owner_id() {
            self.remote_call("delete", self.remote.delete_by_id(&owner, id))
                .await;
        }
        Ok(removed)
    }

    /// Empty the collection. Does nothing unless `confirmation` is
    /// `Confirmed`. Returns whether the collection was cleared.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cache cannot be written.
    pub async fn clear_all(&mut self, confirmation: Confirmation) -> Result<bool, StoreError> {
        if confirmation == Confirmation::Declined {
            return Ok(false);
        }
        self.entries.clear();
        self.persist()?;
        tracing::debug!("cleared all entries");

        if let Some(owner) = self.owner_id() {
            self.remote_call("delete all", self.remote.delete_all(&owner))
                .await;
        }
        Ok(true)
    }

    /// Replace the collection with the contents of an import file. Returns
    /// the number of entries imported.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Import` if the file is not a JSON array; the
    /// collection is untouched in that case. Also fails if the cache cannot be
    /// written.
    pub async fn import(&mut self, contents: &str) -> Result<usize, StoreError> {
        let imported = normalize(parse_import(contents)?);
        let count = imported.len();
        self.entries = imported;
        self.persist()?;
        tracing::debug!(count, "imported entries");

        if let Some(owner) = self.owner_id() {
            let upserted = self
                .remote_call("import upsert", self.remote.upsert(&owner, &self.entries))
                .await;
            if upserted.is_some() {
                self.reload_from_remote(&owner).await?;
            }
        }
        Ok(count)
    }

    /// Serialize the collection, named with today's local date.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialize` if serialization fails.
    pub fn export(&self) -> Result<Export, StoreError> {
        Export::new(&self.entries, chrono::Local::now().date_naive())
    }

    fn owner_id(&self) -> Option<String> {
        self.owner.as_ref().map(|o| o.user_id.clone())
    }

    async fn reload_from_remote(&mut self, owner: &str) -> Result<(), StoreError> {
        let Some(rows) = self
            .remote_call("select", self.remote.select_by_owner(owner))
            .await
        else {
            return Ok(());
        };
        self.entries = normalize(rows);
        tracing::debug!(count = self.entries.len(), "replaced collection with remote rows");
        self.persist()
    }

    /// Await a remote operation with the sync state raised. Failures are
    /// logged and mapped to `None`.
    async fn remote_call<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, RemoteError>>,
    ) -> Option<T> {
        self.sync.send_replace(SyncState::Syncing);
        let result = call.await;
        self.sync.send_replace(SyncState::Idle);
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(%error, operation, "remote call failed; keeping local state");
                None
            }
        }
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.cache.save(&CacheDocument {
            entries: self.entries.clone(),
            first_sync_done: self.first_sync_done,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::remote::MemoryRemote;

    fn store(dir: &tempfile::TempDir) -> EntryStore<MemoryRemote> {
        EntryStore::load(
            PersistentCache::new(dir.path().join("cache.json")),
            MemoryRemote::new(),
        )
    }

    #[tokio::test]
    async fn add_trims_and_parses() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut store = store(&dir);
        let entry = store
            .add(" Dips ", " 2024-01-01 ", "12,5", "x")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entry.exercise, "Dips");
        assert_eq!(entry.date, "2024-01-01");
        assert!((entry.weight - 12.5).abs() < f64::EPSILON);
        assert_eq!(entry.reps, None);
    }

    #[tokio::test]
    async fn sync_state_returns_to_idle() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut store = store(&dir);
        let mut rx = store.subscribe_sync();
        store
            .on_identity_change(Some(OwnerIdentity {
                user_id: "u1".into(),
                email: None,
            }))
            .await
            .unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SyncState::Idle);
        assert_eq!(store.sync_state(), SyncState::Idle);
    }

    #[tokio::test]
    async fn refresh_without_owner_does_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut store = store(&dir);
        assert!(!store.refresh().await.unwrap());
        assert!(store.remote().calls().is_empty());
    }

    #[tokio::test]
    async fn declined_clear_keeps_entries() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut store = store(&dir);
        store.add("Dips", "2024-01-01", "10", "").await.unwrap();
        assert!(!store.clear_all(Confirmation::Declined).await.unwrap());
        assert_eq!(store.entries().len(), 1);
        assert!(store.clear_all(Confirmation::Confirmed).await.unwrap());
        assert!(store.entries().is_empty());
    }
}
