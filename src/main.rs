//! numbers-api server binary
//!
//! Listens on `0.0.0.0:$PORT` (default 8686). See [`numbers_api::config`] for
//! the other environment variables.

use numbers_api::{Config, logging, run_with_shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init()?;

    let config = Config::from_env()?;
    tracing::info!(
        address = %config.server.bind_address,
        max_timeout_ms = config.fetch.max_timeout.as_millis() as u64,
        "Running numbers-api on http://127.0.0.1:{}",
        config.server.bind_address.port()
    );

    run_with_shutdown(config).await?;
    Ok(())
}
