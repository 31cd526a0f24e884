use std::str::FromStr;

use osdb_domain::{OsdbError, Result};
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Output shape of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, one line per event.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = OsdbError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(OsdbError::InvalidInput(format!("unknown log format: {other}"))),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber, writing to stderr.
///
/// # Errors
/// `OsdbError::Internal` when a global subscriber is already set.
pub fn try_init_tracing(format: LogFormat) -> Result<()> {
    let builder =
        tracing_subscriber::fmt().with_env_filter(env_filter()).with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed
        .map_err(|err| OsdbError::Internal(format!("failed to install tracing subscriber: {err}")))
}

/// Like [`try_init_tracing`], but a second call is silently ignored.
pub fn init_tracing(format: LogFormat) {
    if try_init_tracing(format).is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
