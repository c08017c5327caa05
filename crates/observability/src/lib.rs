//! Logging setup shared by the engine's tests, benches and embedding programs.

/// Install the process-wide log subscriber.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber construction (format, filters).
pub mod tracing;

pub use tracing::LogFormat;
