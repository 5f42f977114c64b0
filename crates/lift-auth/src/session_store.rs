use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;
use crate::session::Session;

const KEYRING_USER: &str = "session";
const SESSION_FILE_NAME: &str = "session.json";

/// Persists the signed-in session between runs.
///
/// The OS keychain is tried first; when it is unavailable (headless Linux,
/// CI) the session is written to a `0600` JSON file next to the entry cache.
#[derive(Debug, Clone)]
pub struct SessionStore {
    keyring_service: Option<String>,
    file_path: Option<PathBuf>,
}

impl SessionStore {
    /// Keychain under `keyring_service`, file fallback under the user data dir.
    #[must_use]
    pub fn new(keyring_service: &str) -> Self {
        Self {
            keyring_service: Some(keyring_service.to_string()),
            file_path: default_file_path(),
        }
    }

    /// File storage only, at `path`. Never touches the keychain.
    #[must_use]
    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            keyring_service: None,
            file_path: Some(path.into()),
        }
    }

    /// Store a session. Falls back to the file if the keychain refuses it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStoreError` if both keychain and file
    /// storage fail.
    pub fn save(&self, session: &Session) -> Result<(), AuthError> {
        let json = serde_json::to_string(session)
            .map_err(|e| AuthError::SessionStoreError(format!("serialize session: {e}")))?;

        if let Some(entry) = self.keyring_entry() {
            match entry.set_password(&json) {
                Ok(()) => return Ok(()),
                Err(error) => tracing::warn!(%error, "keyring store failed; falling back to file"),
            }
        }
        self.save_file(&json)
    }

    /// Load the stored session, if any. Unreadable records count as absent.
    #[must_use]
    pub fn load(&self) -> Option<Session> {
        if let Some(entry) = self.keyring_entry()
            && let Ok(json) = entry.get_password()
            && let Some(session) = parse(&json)
        {
            return Some(session);
        }
        self.load_file()
    }

    /// Remove the session from keychain and file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStoreError` if the session file exists but
    /// cannot be removed.
    pub fn clear(&self) -> Result<(), AuthError> {
        if let Some(entry) = self.keyring_entry() {
            // absent credentials are fine
            let _ = entry.delete_credential();
        }
        if let Some(path) = &self.file_path
            && path.exists()
        {
            fs::remove_file(path).map_err(|e| {
                AuthError::SessionStoreError(format!("failed to delete {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }

    /// Where the current session lives, for `auth status`.
    #[must_use]
    pub fn source(&self) -> Option<&'static str> {
        if let Some(entry) = self.keyring_entry()
            && entry.get_password().is_ok_and(|json| parse(&json).is_some())
        {
            return Some("keyring");
        }
        self.load_file().map(|_| "file")
    }

    fn keyring_entry(&self) -> Option<keyring::Entry> {
        let service = self.keyring_service.as_deref()?;
        match keyring::Entry::new(service, KEYRING_USER) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(%error, "keyring unavailable");
                None
            }
        }
    }

    fn save_file(&self, json: &str) -> Result<(), AuthError> {
        let path = self.file_path.as_deref().ok_or_else(|| {
            AuthError::SessionStoreError("no data directory; cannot store session".into())
        })?;
        write_private(path, json)
    }

    fn load_file(&self) -> Option<Session> {
        let path = self.file_path.as_deref()?;
        let json = fs::read_to_string(path).ok()?;
        let session = parse(&json);
        if session.is_none() && !json.trim().is_empty() {
            tracing::warn!(path = %path.display(), "ignoring unreadable session file");
        }
        session
    }
}

fn default_file_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("liftlog").join(SESSION_FILE_NAME))
}

fn parse(json: &str) -> Option<Session> {
    serde_json::from_str(json).ok()
}

fn write_private(path: &Path, contents: &str) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::SessionStoreError(format!("mkdir {}: {e}", parent.display())))?;
    }
    fs::write(path, contents)
        .map_err(|e| AuthError::SessionStoreError(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::SessionStoreError(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}
