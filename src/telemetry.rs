//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Events go to stderr so stdout only carries
/// command output. The filter comes from `RUST_LOG` and defaults to `warn`.
///
/// Calling this more than once is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
