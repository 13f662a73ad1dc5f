//! Tracing/logging setup shared by binaries and test harnesses.

/// Initialize process-wide tracing/logging.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filter and output format).
pub mod tracing;
