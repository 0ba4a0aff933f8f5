//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Builds the log filter: `RUST_LOG` if set and valid, otherwise `fallback`.
#[must_use]
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber, writing to stderr.
///
/// Stdout is left to the result record. Calling this twice is harmless; the
/// second call keeps the first subscriber.
pub fn init_tracing(fallback: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(fallback))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
