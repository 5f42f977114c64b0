//! Cross-cutting error types for liftlog.
//!
//! Domain-specific errors (`StoreError`, `AuthError`, ...) live in their
//! respective crates. All of them converge into `anyhow` in `lift-cli`.

use thiserror::Error;

/// Errors that can be raised by any liftlog crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (blank field, unparseable number).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operating system random source failed.
    #[error("ID generation failed: {0}")]
    IdGeneration(String),
}
