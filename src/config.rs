//! Runtime configuration: built-in defaults, an optional TOML file,
//! environment variables and command line overrides, applied in that order.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const ENV_API_URL: &str = "CATEGORY_MANAGER_API_URL";
pub const ENV_NOTIFICATION_MS: &str = "CATEGORY_MANAGER_NOTIFICATION_MS";
pub const ENV_TIMEOUT_SECS: &str = "CATEGORY_MANAGER_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub notification_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.escuelajs.co/api/v1".to_string(),
            notification_ms: 3000,
            request_timeout_secs: 15,
        }
    }
}

impl AppConfig {
    /// Load the file layer. An explicit path must exist; the per-user default
    /// location is used only when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Read config file {:?}", path))?;
        let config: Self =
            toml::from_str(&text).with_context(|| format!("Parse config file {:?}", path))?;
        if config.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs in {:?} must be positive", path);
        }
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply environment overrides through `lookup`, usually `std::env::var`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(raw) = lookup(ENV_NOTIFICATION_MS) {
            match raw.trim().parse() {
                Ok(ms) => self.notification_ms = ms,
                Err(_) => log::warn!("Ignoring {}={:?}: not a number", ENV_NOTIFICATION_MS, raw),
            }
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(0) => log::warn!("Ignoring {}={:?}: timeout must be positive", ENV_TIMEOUT_SECS, raw),
                Ok(secs) => self.request_timeout_secs = secs,
                Err(_) => log::warn!("Ignoring {}={:?}: not a number", ENV_TIMEOUT_SECS, raw),
            }
        }
    }

    /// Apply command line overrides, the last layer.
    pub fn apply_cli(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url {
            if url.trim().is_empty() {
                log::warn!("Ignoring empty --api-url");
            } else {
                self.api_base_url = url;
            }
        }
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// `<config_dir>/category-manager/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("category-manager").join("config.toml"))
}
