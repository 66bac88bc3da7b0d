//! Error types for numbers-api
//!
//! Two kinds of failure live here:
//! - [`Error`] for the service plumbing (configuration, binding, client setup)
//! - [`EndpointError`] and [`FetchError`] for the per-endpoint soft failures that
//!   the validator and fetcher absorb and only ever log
//!
//! Nothing on the `/numbers` request path turns into a caller-visible error.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for numbers-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for numbers-api
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "PORT")
        key: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// Logging could not be initialised
    #[error("logging error: {0}")]
    Logging(String),
}

impl Error {
    /// Shorthand for a configuration error tied to a specific key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

/// Why a candidate string was not accepted as an upstream endpoint
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The candidate is not an absolute URL
    #[error("invalid URL {candidate:?}: {source}")]
    Malformed {
        /// The raw candidate string
        candidate: String,
        /// The parser's complaint
        source: url::ParseError,
    },

    /// The candidate parsed but uses a scheme other than http/https
    #[error("unsupported scheme {scheme:?} in {candidate:?}")]
    UnsupportedScheme {
        /// The raw candidate string
        candidate: String,
        /// The scheme that was found
        scheme: String,
    },
}

/// Why a single upstream endpoint contributed no numbers
#[derive(Debug, Error)]
pub enum FetchError {
    /// The shared budget ran out before this endpoint was dispatched
    #[error("time budget exhausted before dispatch")]
    BudgetExhausted,

    /// The endpoint did not answer within its dispatch timeout
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The endpoint answered with a non-2xx status
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    /// The body was not a JSON object with an integer `numbers` list
    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// Connection, TLS or protocol failure
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
}

impl FetchError {
    /// Classify a reqwest failure, folding its own timeout into [`FetchError::Timeout`]
    pub(crate) fn from_reqwest(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            FetchError::Timeout(timeout)
        } else if error.is_decode() {
            FetchError::Decode(error)
        } else {
            FetchError::Network(error)
        }
    }

    /// Whether this failure is the expected "skipped" outcome rather than an upstream fault
    pub fn is_skip(&self) -> bool {
        matches!(self, FetchError::BudgetExhausted)
    }
}
