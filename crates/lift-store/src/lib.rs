//! # lift-store
//!
//! The liftlog entry store.
//!
//! [`EntryStore`] owns the in-memory collection, mirrors it into a JSON
//! [`PersistentCache`] after every change, and reconciles with a
//! [`RemoteStore`] whenever an owner is signed in. Two remotes ship with the
//! crate: [`RestRemote`] for a PostgREST-style hosted table and
//! [`MemoryRemote`] for tests.

pub mod cache;
pub mod error;
pub mod import_export;
pub mod remote;
pub mod store;

pub use cache::{CacheDocument, PersistentCache};
pub use error::{ImportError, RemoteError, StoreError};
pub use import_export::Export;
pub use remote::{MemoryRemote, RemoteCall, RemoteStore, RestRemote};
pub use store::{Confirmation, EntryStore, SyncState};
