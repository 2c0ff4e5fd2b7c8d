//! Configuration management for the ledger explorer

use crate::error::{ExplorerError, Result};
use crate::storage::{default_storage_path, expand_home};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Data-source URLs. The first serves blocks, the second ledger metrics.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default)]
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Request timeout as a human-readable duration, e.g. "30s"
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub path: Option<String>,
    /// Keep preferences in memory only
    #[serde(default)]
    pub ephemeral: bool,
}

fn default_timeout() -> String {
    "30s".to_string()
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).map_err(|e| ExplorerError::ConfigError(e.to_string()))?;
        config.request_timeout()?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Result<Duration> {
        let timeout = humantime::parse_duration(self.http.timeout.trim()).map_err(|e| {
            ExplorerError::ConfigError(format!("http.timeout '{}': {}", self.http.timeout, e))
        })?;
        if timeout.is_zero() {
            return Err(ExplorerError::ConfigError(
                "http.timeout must be greater than zero".to_string(),
            ));
        }
        Ok(timeout)
    }

    pub fn storage_path(&self) -> PathBuf {
        match self.storage.path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => expand_home(path),
            _ => default_storage_path(),
        }
    }
}

/// Load configuration from `path`; a missing file yields defaults
pub fn load_config(path: &Path) -> Result<Config> {
    let config_str = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => {
            return Err(ExplorerError::ConfigError(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    Config::from_toml_str(&config_str)
}
