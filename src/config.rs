//! Configuration Management
//!
//! Handles persistent configuration storage for placedash.

use crate::api::DEFAULT_API_URL;
use crate::view::Route;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the configured API base URL
pub const API_URL_ENV: &str = "PLACEDASH_API_URL";

/// User configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// API base URL override
    #[serde(default)]
    pub api_url: Option<String>,
    /// Last viewed route, e.g. "users/3"
    #[serde(default)]
    pub last_view: Option<String>,
}

impl Config {
    /// Directory holding the config file and the log file
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("placedash"))
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::dir().map(|p| p.join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from `path`; a missing or invalid file yields the defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    /// Get effective API URL (CLI > env > config > public default)
    pub fn effective_api_url(&self, cli: Option<&str>) -> String {
        let env = std::env::var(API_URL_ENV).ok();
        resolve_api_url(cli, env.as_deref(), self.api_url.as_deref())
    }

    /// Get the route to open at startup (CLI > last view > dashboard).
    /// An unparseable saved view falls back to the dashboard.
    pub fn effective_view(&self, cli: Option<Route>) -> Route {
        cli.or_else(|| self.last_view.as_deref().and_then(|v| v.parse().ok()))
            .unwrap_or_default()
    }

    /// Remember the route on screen and save
    pub fn set_last_view(&mut self, route: Route) -> Result<()> {
        self.last_view = Some(route.to_string());
        self.save()
    }
}

fn resolve_api_url(cli: Option<&str>, env: Option<&str>, config: Option<&str>) -> String {
    [cli, env, config]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_URL)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("placedash-test-{}-{}", std::process::id(), name))
            .join("config.json")
    }

    #[test]
    fn test_api_url_precedence() {
        assert_eq!(
            resolve_api_url(Some("http://cli"), Some("http://env"), Some("http://cfg")),
            "http://cli"
        );
        assert_eq!(
            resolve_api_url(None, Some("http://env"), Some("http://cfg")),
            "http://env"
        );
        assert_eq!(resolve_api_url(None, None, Some("http://cfg")), "http://cfg");
        assert_eq!(resolve_api_url(None, None, None), DEFAULT_API_URL);
    }

    #[test]
    fn test_blank_api_url_is_skipped() {
        assert_eq!(resolve_api_url(Some("  "), None, Some("http://cfg")), "http://cfg");
        assert_eq!(resolve_api_url(None, Some(""), None), DEFAULT_API_URL);
    }

    #[test]
    fn test_effective_view() {
        let config = Config {
            api_url: None,
            last_view: Some("users/3".into()),
        };
        assert_eq!(config.effective_view(None), Route::UserProfile(3));
        assert_eq!(config.effective_view(Some(Route::Posts)), Route::Posts);

        let broken = Config {
            api_url: None,
            last_view: Some("albums".into()),
        };
        assert_eq!(broken.effective_view(None), Route::Dashboard);
        assert_eq!(Config::default().effective_view(None), Route::Dashboard);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip");
        let config = Config {
            api_url: Some("http://localhost:3000".into()),
            last_view: Some("posts/7".into()),
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), config);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_or_invalid_file_gives_defaults() {
        let path = temp_path("invalid");
        assert_eq!(Config::load_from(&path), Config::default());

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_path("partial");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"api_url": "http://x"}"#).unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.api_url.as_deref(), Some("http://x"));
        assert!(config.last_view.is_none());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
