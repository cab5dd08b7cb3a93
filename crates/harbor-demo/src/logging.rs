//! Logging setup for the demo binary.

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber.
///
/// The filter comes from `RUST_LOG` (for example `RUST_LOG=harbor_core=debug`)
/// and defaults to `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}
