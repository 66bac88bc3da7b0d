//! # numbers-api
//!
//! HTTP service that fetches integer lists from caller-supplied URLs in
//! parallel and answers with their sorted union, all within a fixed time budget.
//!
//! ## Pipeline
//!
//! 1. [`validator`] keeps the candidate strings that are absolute http/https URLs
//! 2. [`fetcher`] sends one GET per endpoint concurrently, each bounded by what
//!    is left of the shared [`Budget`] when it is dispatched
//! 3. [`merge`] sorts and deduplicates everything that arrived
//!
//! Failures along the way only shrink the result; `GET /numbers` always
//! answers `200 OK` with `{"numbers": [...]}`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use numbers_api::{Config, NumberAggregator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let aggregator = NumberAggregator::new(&config.fetch)?;
//!
//!     let set = aggregator
//!         .aggregate(&["http://127.0.0.1:8090/primes", "http://127.0.0.1:8090/fibo"])
//!         .await;
//!     println!("{:?}", set.as_slice());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Request orchestration
pub mod aggregator;
/// HTTP server
pub mod api;
/// Shared fetch deadline
pub mod budget;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Concurrent upstream fetching
pub mod fetcher;
/// Logging setup
pub mod logging;
/// Sorted deduplication
pub mod merge;
/// Core types
pub mod types;
/// Candidate URL validation
pub mod validator;

// Re-export commonly used types
pub use aggregator::NumberAggregator;
pub use budget::Budget;
pub use config::{Config, FetchConfig, ServerConfig};
pub use error::{EndpointError, Error, FetchError, Result};
pub use fetcher::NumberFetcher;
pub use merge::merge_unique;
pub use types::{Endpoint, NumberSet};
pub use validator::validate_endpoints;

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Run the API server until a termination signal arrives.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// In-flight requests finish before this returns.
///
/// # Example
///
/// ```no_run
/// use numbers_api::{Config, run_with_shutdown};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_with_shutdown(Config::from_env()?).await?;
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(config: Config) -> Result<()> {
    let aggregator = Arc::new(NumberAggregator::new(&config.fetch)?);
    let config = Arc::new(config);

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            wait_for_signal().await;
            shutdown.cancel();
        }
    });

    api::start_api_server(aggregator, config, shutdown).await
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Signal registration may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
