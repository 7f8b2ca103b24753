//! Runner configuration.
//!
//! The runner never reads globals: a `Config` is built once, from an optional
//! TOML file overlaid with command-line flags, and handed to
//! `ScenarioRunner::new`.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1.0/customers";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Collection URL every step is addressed under.
    pub base_url: String,
    /// Upper bound on each request, connect through body read.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// On-disk form, e.g.
///
/// ```toml
/// base_url = "http://staging:8080/api/v1.0/customers"
/// timeout_secs = 5
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Overrides win over the file, the file wins over defaults.
    pub fn resolve(file: Option<FileConfig>, overrides: Overrides) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();
        let base_url = overrides
            .base_url
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = overrides
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let config = Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidBaseUrl(self.base_url.clone());
        let url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid());
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid());
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
