//! Passwordless sign-in configuration.

use serde::{Deserialize, Serialize};

fn default_keyring_service() -> String {
    "liftlog".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Where the emailed link should land after verification. Empty means
    /// the auth server's configured site URL.
    #[serde(default)]
    pub redirect_url: String,

    /// OS keychain service name for the stored session. Tests override this
    /// (e.g. `liftlog-test`) to stay away from real credentials.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            redirect_url: String::new(),
            keyring_service: default_keyring_service(),
        }
    }
}

impl AuthConfig {
    /// The redirect URL, if one is set.
    #[must_use]
    pub fn redirect(&self) -> Option<&str> {
        Some(self.redirect_url.as_str()).filter(|url| !url.is_empty())
    }
}
