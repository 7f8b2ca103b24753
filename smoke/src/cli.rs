//! Command-line surface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, FileConfig, Overrides};
use crate::error::ConfigError;
use crate::scenario::Mode;

#[derive(Parser, Debug)]
#[command(name = "customer-smoke", about = "Drive the customer API through a full create-to-delete lifecycle")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Base resource URL, e.g. http://localhost:8080/api/v1.0/customers
    #[arg(long, env = "CUSTOMER_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "CUSTOMER_API_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// TOML file providing `base_url` and `timeout_secs`
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Check every step and stop at the first mismatch
    #[arg(long)]
    pub verify: bool,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.verify {
            Mode::Verify
        } else {
            Mode::Trace
        }
    }

    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        let file = self.config.as_deref().map(FileConfig::load).transpose()?;
        Config::resolve(
            file,
            Overrides {
                base_url: self.base_url.clone(),
                timeout_secs: self.timeout_secs,
            },
        )
    }
}
