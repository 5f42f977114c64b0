//! Remote table adapter.
//!
//! The table holds one row per entry plus the owning user's id. Every
//! operation is scoped to an owner; the store never reads or writes rows
//! belonging to anyone else.

mod memory;
mod rest;

use std::future::Future;

use lift_core::Entry;

pub use memory::{MemoryRemote, RemoteCall};
pub use rest::RestRemote;

use crate::error::RemoteError;

pub trait RemoteStore {
    /// All rows owned by `owner`, ascending by date.
    fn select_by_owner(
        &self,
        owner: &str,
    ) -> impl Future<Output = Result<Vec<Entry>, RemoteError>> + Send;

    /// Insert or overwrite rows by id, tagging each with `owner`.
    fn upsert(
        &self,
        owner: &str,
        entries: &[Entry],
    ) -> impl Future<Output = Result<(), RemoteError>> + Send;

    /// Delete the row with `id`, only if `owner` owns it.
    fn delete_by_id(
        &self,
        owner: &str,
        id: &str,
    ) -> impl Future<Output = Result<(), RemoteError>> + Send;

    /// Delete every row owned by `owner`.
    fn delete_all(&self, owner: &str) -> impl Future<Output = Result<(), RemoteError>> + Send;
}

/// An absent remote fails every call; the store logs it and carries on
/// local-only.
impl<R: RemoteStore + Sync> RemoteStore for Option<R> {
    async fn select_by_owner(&self, owner: &str) -> Result<Vec<Entry>, RemoteError> {
        match self {
            Some(remote) => remote.select_by_owner(owner).await,
            None => Err(not_configured()),
        }
    }

    async fn upsert(&self, owner: &str, entries: &[Entry]) -> Result<(), RemoteError> {
        match self {
            Some(remote) => remote.upsert(owner, entries).await,
            None => Err(not_configured()),
        }
    }

    async fn delete_by_id(&self, owner: &str, id: &str) -> Result<(), RemoteError> {
        match self {
            Some(remote) => remote.delete_by_id(owner, id).await,
            None => Err(not_configured()),
        }
    }

    async fn delete_all(&self, owner: &str) -> Result<(), RemoteError> {
        match self {
            Some(remote) => remote.delete_all(owner).await,
            None => Err(not_configured()),
        }
    }
}

fn not_configured() -> RemoteError {
    RemoteError::NotConfigured("no remote table for this run".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_remote_fails_every_call() {
        let remote: Option<MemoryRemote> = None;
        assert!(matches!(
            remote.select_by_owner("u1").await,
            Err(RemoteError::NotConfigured(_))
        ));
        assert!(remote.upsert("u1", &[]).await.is_err());
    }

    #[tokio::test]
    async fn present_remote_is_forwarded() {
        let inner = MemoryRemote::new();
        let remote = Some(inner.clone());
        remote.delete_all("u1").await.unwrap();
        assert_eq!(
            inner.calls(),
            vec![RemoteCall::DeleteAll { owner: "u1".into() }]
        );
    }
}
