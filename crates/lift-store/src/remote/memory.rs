//! In-process remote table. Backs the store's tests and runs without a network.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lift_core::Entry;
use lift_core::entry::sort_by_date;

use super::RemoteStore;
use crate::error::RemoteError;

/// A recorded remote operation, for asserting what the store sent.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    Select { owner: String },
    Upsert { owner: String, ids: Vec<String> },
    DeleteById { owner: String, id: String },
    DeleteAll { owner: String },
}

#[derive(Debug, Default)]
struct State {
    rows: Vec<(String, Entry)>,
    calls: Vec<RemoteCall>,
    failing: bool,
}

/// Cloning shares the underlying table, so a test can keep a handle while the
/// store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryRemote {
    state: Arc<Mutex<State>>,
}

impl MemoryRemote {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put rows for `owner` directly into the table, bypassing the call log.
    pub fn seed(&self, owner: &str, entries: impl IntoIterator<Item = Entry>) {
        let mut state = self.lock();
        state
            .rows
            .extend(entries.into_iter().map(|e| (owner.to_string(), e)));
    }

    /// Rows owned by `owner`, in table order.
    #[must_use]
    pub fn rows_for(&self, owner: &str) -> Vec<Entry> {
        self.lock()
            .rows
            .iter()
            .filter(|(o, _)| o == owner)
            .map(|(_, e)| e.clone())
            .collect()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// While set, every operation fails with `RemoteError::Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: RemoteCall) -> Result<MutexGuard<'_, State>, RemoteError> {
        let mut state = self.lock();
        state.calls.push(call);
        if state.failing {
            Err(RemoteError::Unavailable)
        } else {
            Ok(state)
        }
    }
}

impl RemoteStore for MemoryRemote {
    async fn select_by_owner(&self, owner: &str) -> Result<Vec<Entry>, RemoteError> {
        let state = self.record(RemoteCall::Select {
            owner: owner.to_string(),
        })?;
        let mut entries: Vec<Entry> = state
            .rows
            .iter()
            .filter(|(o, _)| o == owner)
            .map(|(_, e)| e.clone())
            .collect();
        drop(state);
        sort_by_date(&mut entries);
        Ok(entries)
    }

    async fn upsert(&self, owner: &str, entries: &[Entry]) -> Result<(), RemoteError> {
        let mut state = self.record(RemoteCall::Upsert {
            owner: owner.to_string(),
            ids: entries.iter().map(|e| e.id.clone()).collect(),
        })?;
        for entry in entries {
            let row = (owner.to_string(), entry.clone());
            match state.rows.iter_mut().find(|(_, e)| e.id == entry.id) {
                Some(existing) => *existing = row,
                None => state.rows.push(row),
            }
        }
        Ok(())
    }

    async fn delete_by_id(&self, owner: &str, id: &str) -> Result<(), RemoteError> {
        let mut state = self.record(RemoteCall::DeleteById {
            owner: owner.to_string(),
            id: id.to_string(),
        })?;
        state.rows.retain(|(o, e)| !(o == owner && e.id == id));
        Ok(())
    }

    async fn delete_all(&self, owner: &str) -> Result<(), RemoteError> {
        let mut state = self.record(RemoteCall::DeleteAll {
            owner: owner.to_string(),
        })?;
        state.rows.retain(|(o, _)| o != owner);
        Ok(())
    }
}
