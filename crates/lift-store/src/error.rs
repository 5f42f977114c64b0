//! Error types for lift-store.

use std::path::PathBuf;

use lift_core::CoreError;
use thiserror::Error;

/// Errors a store operation returns to its caller.
///
/// Remote failures are deliberately absent: the store logs them and keeps
/// its local state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the cache file failed.
    #[error("cache I/O error at {}: {source}", path.display())]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The collection could not be serialized.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The import file was rejected.
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Failures talking to the remote table.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The remote answered with a non-success status.
    #[error("remote API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Transport failure: DNS, TLS, timeout, connection reset.
    #[error("remote request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("unexpected remote response: {0}")]
    Decode(String),

    /// Remote section missing from config.
    #[error("remote is not configured: {0}")]
    NotConfigured(String),

    /// Injected by the in-memory remote.
    #[error("remote unavailable")]
    Unavailable,
}

/// Why an import file was rejected as a whole.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("import file is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("import file must contain a JSON array of entries")]
    NotAnArray,
}
