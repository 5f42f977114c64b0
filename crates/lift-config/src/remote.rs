//! Hosted table (PostgREST / Supabase-style) configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_table() -> String {
    "entries".to_string()
}

/// Default HTTP request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Project base URL (e.g., `https://abcd.supabase.co`). Shared by the
    /// table API (`/rest/v1`) and the auth API (`/auth/v1`).
    #[serde(default)]
    pub url: String,

    /// Public anon key sent as the `apikey` header.
    #[serde(default)]
    pub anon_key: String,

    /// Table holding the entries.
    #[serde(default = "default_table")]
    pub table: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            table: default_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemoteConfig {
    /// Check if the remote has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }

    /// Fail with `NotConfigured` unless [`Self::is_configured`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` for the `remote` section.
    pub fn require(&self) -> Result<&Self, ConfigError> {
        if self.is_configured() {
            Ok(self)
        } else {
            Err(ConfigError::NotConfigured {
                section: "remote".into(),
            })
        }
    }

    /// Base URL with any trailing slash removed.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Full URL of the entries table endpoint.
    #[must_use]
    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url(), self.table)
    }

    /// Root of the auth API.
    #[must_use]
    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.base_url())
    }
}
