//! Logging initialisation.
//!
//! The library only emits `tracing` events and never installs a subscriber
//! on its own; call sites stay free of global side effects and tests can
//! run without any logging set up. Binaries opt in by calling [`init`]
//! once at startup.

use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// Installs the global log subscriber.
///
/// The filter honours `RUST_LOG` when set and otherwise defaults to `info`
/// (`debug` when `verbose` is true). Must be called at most once per
/// process.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTime::rfc_3339())
        .with_target(false)
        .init();
}
