//! Sequential smoke-test client for the customer REST API.
//!
//! # Overview
//! Drives one customer record through create, list, fetch, search, full
//! update, contact patch, existence check, capability discovery, delete and
//! a final not-found check, printing every response.
//!
//! # Design
//! - Requests and parsing come from `customer-core`; this crate only owns
//!   the network (`transport`) and the ordering of steps (`scenario`).
//! - `Config` is resolved once from flags, environment and an optional
//!   TOML file, then passed into the runner.
//! - The trace goes to any `io::Write`; logs go to stderr through `tracing`.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod scenario;
pub mod transport;

pub use config::Config;
pub use error::{ConfigError, Error, Result, RunError, TransportError};
pub use scenario::{Captured, Mode, ScenarioReport, ScenarioRunner, Step, StepRecord};
pub use transport::{Transport, UreqTransport};
