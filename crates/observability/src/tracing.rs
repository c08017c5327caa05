//! Log output for the engine and the programs embedding it.
//!
//! `RUST_LOG` sets the filter (default `info`); `STILLHOUSE_LOG_FORMAT`
//! picks `json` lines (default) or `compact` human-readable lines.

use std::str::FromStr;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::SystemTime;

pub const DEFAULT_FILTER: &str = "info";
pub const LOG_FORMAT_VAR: &str = "STILLHOUSE_LOG_FORMAT";

/// Line format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "compact" | "text" => Ok(LogFormat::Compact),
            other => Err(format!("unknown log format `{other}`")),
        }
    }
}

/// Filter from explicit directives, or the default when they are absent or
/// do not parse.
pub fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the subscriber described by the environment.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let format = std::env::var(LOG_FORMAT_VAR)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_default();
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    init_with(format, directives.as_deref());
}

/// Install a subscriber with an explicit format and filter.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_with(format: LogFormat, directives: Option<&str>) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter_from(directives))
        .with_timer(SystemTime)
        .with_target(false);
    match format {
        LogFormat::Json => builder.json().try_init().is_ok(),
        LogFormat::Compact => builder.compact().try_init().is_ok(),
    }
}
