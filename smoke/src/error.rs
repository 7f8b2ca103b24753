//! Error types for the smoke runner.

use std::io;
use std::path::PathBuf;

use customer_core::{ApiError, HttpMethod};
use thiserror::Error;

use crate::scenario::Step;

/// Result type alias using the top-level `Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop the binary.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Run(#[from] RunError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid base URL '{0}': expected http:// or https:// followed by a host")]
    InvalidBaseUrl(String),

    #[error("Request timeout must be at least one second")]
    ZeroTimeout,
}

/// A request that never produced a response: refused connection, DNS
/// failure, timeout, or an unreadable body.
#[derive(Debug, Error)]
#[error("{method} {url} failed: {source}")]
pub struct TransportError {
    pub method: HttpMethod,
    pub url: String,
    #[source]
    pub source: ureq::Error,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Could not build request: {0}")]
    Api(#[from] ApiError),

    #[error("Could not capture the created customer: {0}")]
    Capture(String),

    #[error("{step} failed verification: {reason}")]
    Verification { step: Step, reason: String },

    #[error("Failed to write trace: {0}")]
    Io(#[from] io::Error),
}

impl RunError {
    pub fn verification(step: Step, reason: impl Into<String>) -> Self {
        RunError::Verification {
            step,
            reason: reason.into(),
        }
    }
}
