//! Shared tracing/logging initialization.
//!
//! The server binary (and anything else that wants structured logs) sets
//! up `tracing_subscriber` the same way: env-filter from `RUST_LOG` with a
//! crate-provided default, plus optional JSON output for log shippers.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// * `default_filter` -- used when `RUST_LOG` is not set, e.g.
///   `"storecast_server=info"`.
/// * `log_json` -- emit JSON log lines instead of the human-readable
///   format.
pub fn init_tracing(default_filter: &str, log_json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
