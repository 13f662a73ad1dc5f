//! Tracing/logging initialization.
//!
//! Filtering comes from `RUST_LOG` (default `info`). Output is
//! human-readable by default; set `RENTDESK_LOG_FORMAT=json` for
//! structured logs in deployed environments.

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber.
///
/// Safe to call multiple times (subsequent calls are no-ops), so test
/// harnesses can call it unconditionally.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let json = matches!(
        std::env::var("RENTDESK_LOG_FORMAT").as_deref(),
        Ok("json")
    );

    if json {
        let _ = builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init();
    } else {
        let _ = builder.try_init();
    }
}
