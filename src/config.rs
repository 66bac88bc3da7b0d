//! Configuration types for numbers-api

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, time::Duration};

/// Environment variable holding the listening port
pub const PORT_ENV: &str = "PORT";
/// Environment variable holding the fetch budget in milliseconds
pub const MAX_TIMEOUT_ENV: &str = "NUMBERS_MAX_TIMEOUT_MS";
/// Environment variable overriding the outbound user agent
pub const USER_AGENT_ENV: &str = "NUMBERS_USER_AGENT";

/// Port used when `PORT` is not set
pub const DEFAULT_PORT: u16 = 8686;

/// Main configuration
///
/// - [`server`](ServerConfig) — listening address, CORS, API docs
/// - [`fetch`](FetchConfig) — deadline and headers for upstream requests
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream fetch settings
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl Config {
    /// Defaults overlaid with values from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the variable if a value cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values returned by `lookup`
    ///
    /// Recognised keys: [`PORT_ENV`], [`MAX_TIMEOUT_ENV`], [`USER_AGENT_ENV`].
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Config::default();

        if let Some(port) = get(PORT_ENV) {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|e| Error::config(PORT_ENV, format!("invalid port {port:?}: {e}")))?;
            config.server.bind_address.set_port(port);
        }

        if let Some(millis) = get(MAX_TIMEOUT_ENV) {
            let millis: u64 = millis.trim().parse().map_err(|e| {
                Error::config(MAX_TIMEOUT_ENV, format!("invalid timeout {millis:?}: {e}"))
            })?;
            config.fetch.max_timeout = Duration::from_millis(millis);
        }

        if let Some(user_agent) = get(USER_AGENT_ENV) {
            config.fetch.user_agent = user_agent;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.fetch.max_timeout.is_zero() {
            return Err(Error::Config {
                message: "fetch budget must be greater than zero".to_string(),
                key: Some("fetch.max_timeout".to_string()),
            });
        }
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8686)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
        }
    }
}

/// Upstream fetch configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Wall-clock budget shared by all upstream requests of one call (default: 500ms)
    ///
    /// Each request is dispatched with whatever is left of this budget at that
    /// moment; once it is spent, remaining endpoints are skipped.
    #[serde(default = "default_max_timeout")]
    pub max_timeout: Duration,

    /// User-Agent header sent upstream (default: "numbers-api/<version>")
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_timeout: default_max_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}

fn default_true() -> bool {
    true
}

fn default_max_timeout() -> Duration {
    Duration::from_millis(500)
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}
