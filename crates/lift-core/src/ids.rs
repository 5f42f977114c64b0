//! ID prefix constants and random ID generation.

use crate::errors::CoreError;

/// Prefix for entry IDs (`ent-3f9a0c1b7d2e4a58`).
pub const PREFIX_ENTRY: &str = "ent";

/// Number of random bytes behind an ID (rendered as twice as many hex digits).
const RANDOM_BYTES: usize = 8;

/// Generate a prefixed random ID, e.g. `"ent-3f9a0c1b7d2e4a58"`.
///
/// # Errors
///
/// Returns `CoreError::IdGeneration` if the OS random source is unavailable.
pub fn generate_id(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; RANDOM_BYTES];
    getrandom::fill(&mut bytes).map_err(|e| CoreError::IdGeneration(e.to_string()))?;
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{prefix}-{hex}"))
}

/// Generate an entry ID that `is_taken` reports as free.
///
/// # Errors
///
/// Returns `CoreError::IdGeneration` if the OS random source is unavailable.
pub fn generate_unique_id<F>(prefix: &str, is_taken: F) -> Result<String, CoreError>
where
    F: Fn(&str) -> bool,
{
    loop {
        let id = generate_id(prefix)?;
        if !is_taken(&id) {
            return Ok(id);
        }
    }
}
