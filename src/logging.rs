//! Diagnostic logging for hosts embedding forms.
//!
//! The library only emits `tracing` events; installing a subscriber is up to
//! the host. [`init_logging`] is a stderr default for hosts that have none.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a stderr subscriber filtered by `RUST_LOG`, falling back to
/// `default_level` (e.g. `"warn"`, `"stepform=debug"`).
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(default_level: &str) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
}
