//! # lift-config
//!
//! Layered configuration loading for liftlog using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LIFTLOG_*` prefix, `__` as separator)
//! 2. Project-level `.liftlog/config.toml`
//! 3. User-level `~/.config/liftlog/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LIFTLOG_REMOTE__URL` -> `remote.url`, `LIFTLOG_AUTH__REDIRECT_URL`
//! -> `auth.redirect_url`, etc. The `__` (double underscore) separates nested
//! config sections.
//!
//! # Usage
//!
//! ```no_run
//! use lift_config::LiftConfig;
//!
//! let config = LiftConfig::load_with_dotenv().expect("config");
//!
//! if config.remote.is_configured() {
//!     println!("Remote table: {}", config.remote.table_url());
//! }
//! ```

mod auth;
mod cache;
mod error;
mod general;
mod remote;

pub use auth::AuthConfig;
pub use cache::CacheConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use remote::RemoteConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every config key.
pub const ENV_PREFIX: &str = "LIFTLOG_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LiftConfig {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl LiftConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed, or
    /// `ConfigError::InvalidValue` if a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support (current directory).
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or layer extra
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".liftlog/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values that would only fail later, far from their source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.remote.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "remote.timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.remote.table.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "remote.table".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.general.chart_width == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.chart_width".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("liftlog").join("config.toml"))
    }
}
