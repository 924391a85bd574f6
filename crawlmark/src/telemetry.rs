//! Tracing bootstrap for binaries and tests embedding this crate.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber with the given filter
/// directive, falling back to `RUST_LOG` when set.
///
/// Safe to call more than once; repeat initializations are ignored.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
