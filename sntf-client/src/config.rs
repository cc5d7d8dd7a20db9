//! Configuration for the page pipeline and the offline proxy.

use std::net::SocketAddr;
use std::time::Duration;

use crate::offline::AgentConfig;

/// Default backend origin.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default quiet period before an autocomplete match pass runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default upper bound on a backend request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for talking to the backend from the page.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin of the journey-search API
    pub base_url: String,
    /// Request timeout; expiry is reported as a search error
    pub timeout: Duration,
    /// Autocomplete debounce quiet period
    pub debounce: Duration,
}

impl ClientConfig {
    /// Create a config for the given backend origin.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the autocomplete debounce period.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Configuration for the offline proxy binary, read from the environment.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Address the proxy listens on
    pub bind_addr: SocketAddr,
    /// Origin that requests are forwarded to
    pub upstream: String,
    /// Timeout for upstream requests
    pub timeout: Duration,
    /// Cache agent settings
    pub agent: AgentConfig,
}

/// Error for an environment variable with an unusable value.
#[derive(Debug, thiserror::Error)]
#[error("invalid value for {name}: {value}")]
pub struct InvalidEnv {
    pub name: &'static str,
    pub value: String,
}

impl ProxyConfig {
    /// Load configuration from `SNTF_*` environment variables.
    ///
    /// - `SNTF_BIND_ADDR` (default `127.0.0.1:8080`)
    /// - `SNTF_UPSTREAM` (default `http://127.0.0.1:8000`)
    /// - `SNTF_CACHE_VERSION` (default `v1`)
    /// - `SNTF_TIMEOUT_SECS` (default `30`)
    pub fn from_env() -> Result<Self, InvalidEnv> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InvalidEnv>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = match lookup("SNTF_BIND_ADDR") {
            Some(value) => value.parse().map_err(|_| InvalidEnv {
                name: "SNTF_BIND_ADDR",
                value,
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 8080)),
        };

        let upstream = lookup("SNTF_UPSTREAM").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match lookup("SNTF_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(value.parse().map_err(|_| InvalidEnv {
                name: "SNTF_TIMEOUT_SECS",
                value,
            })?),
            None => DEFAULT_TIMEOUT,
        };

        let mut agent = AgentConfig::default();
        if let Some(version) = lookup("SNTF_CACHE_VERSION").filter(|v| !v.trim().is_empty()) {
            agent = agent.with_version(version.trim());
        }

        Ok(Self {
            bind_addr,
            upstream: upstream.trim_end_matches('/').to_string(),
            timeout,
            agent,
        })
    }
}
