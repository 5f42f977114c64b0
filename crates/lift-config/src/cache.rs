//! Local cache location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const CACHE_FILE_NAME: &str = "cache.json";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Explicit cache file. Defaults to `<data_dir>/liftlog/cache.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl CacheConfig {
    /// Resolve the cache file path, or `None` when no data directory exists
    /// for the current user and no override is set.
    #[must_use]
    pub fn resolve_path(&self) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("liftlog").join(CACHE_FILE_NAME)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins() {
        let config = CacheConfig {
            path: Some(PathBuf::from("/tmp/lifts.json")),
        };
        assert_eq!(config.resolve_path(), Some(PathBuf::from("/tmp/lifts.json")));
    }

    #[test]
    fn default_lands_under_data_dir() {
        let config = CacheConfig::default();
        if let Some(path) = config.resolve_path() {
            assert!(path.ends_with("liftlog/cache.json"));
        }
    }
}
