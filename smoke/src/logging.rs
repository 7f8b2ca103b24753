//! Logging setup for the CLI.
//!
//! Logs go to stderr so the response trace on stdout stays readable and
//! pipeable. Controlled by `RUST_LOG`; default is INFO for this crate and
//! WARN for dependencies.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_cli() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("customer_smoke=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
