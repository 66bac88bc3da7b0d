//! Logging setup using tracing
//!
//! Output goes to stderr, filtered by `RUST_LOG` and defaulting to
//! [`DEFAULT_FILTER`] when it is unset or unparseable.

use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is absent
pub const DEFAULT_FILTER: &str = "info,numbers_api=debug";

/// Initialize the global tracing subscriber
///
/// # Example RUST_LOG values
/// - `RUST_LOG=info` - request summaries and server lifecycle only
/// - `RUST_LOG=numbers_api=trace,tower_http=debug` - everything, including per-request traces
///
/// # Errors
/// Returns an error if a global subscriber has already been set
pub fn init() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
