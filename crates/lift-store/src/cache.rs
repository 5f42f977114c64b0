//! Persistent cache: one JSON document holding the whole collection.

use std::fs;
use std::path::{Path, PathBuf};

use lift_core::Entry;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// On-disk form of the local state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheDocument {
    #[serde(default)]
    pub entries: Vec<Entry>,
    /// Set once the local-only collection has been pushed to an owner.
    #[serde(default)]
    pub first_sync_done: bool,
}

/// Single-slot cache file. Read once at startup, overwritten after every
/// mutation.
#[derive(Debug, Clone)]
pub struct PersistentCache {
    path: PathBuf,
}

impl PersistentCache {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cache. A missing or unreadable file yields an empty document.
    #[must_use]
    pub fn load(&self) -> CacheDocument {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no cache file yet");
                return CacheDocument::default();
            }
            Err(error) => {
                tracing::warn!(%error, path = %self.path.display(), "cache unreadable; starting empty");
                return CacheDocument::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(document) => document,
            Err(error) => {
                tracing::warn!(%error, path = %self.path.display(), "cache corrupt; starting empty");
                CacheDocument::default()
            }
        }
    }

    /// Overwrite the cache with `document`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::CacheIo` if the directory or file cannot be
    /// written, or `StoreError::Serialize` if serialization fails.
    pub fn save(&self, document: &CacheDocument) -> Result<(), StoreError> {
        let json = serde_json::to_string(document)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::CacheIo {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, json).map_err(|source| StoreError::CacheIo {
            path: self.path.clone(),
            source,
        })
    }
}
