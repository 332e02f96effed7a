use std::io;

use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout only carries listing output. `RUST_LOG`
/// overrides the default `info` filter.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}
