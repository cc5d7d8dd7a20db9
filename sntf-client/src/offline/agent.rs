//! The caching agent: install, activate and intercept.

use futures::future::try_join_all;
use reqwest::{Method, Url};
use tracing::{debug, info, warn};

use super::fetcher::{FetchError, Fetcher};
use super::request::{Request, RequestKey, Response};
use super::storage::CacheStorage;

/// Static assets stored at install time. Relative entries resolve against
/// the agent's origin.
pub const DEFAULT_MANIFEST: &[&str] = &[
    "/",
    "/static/frontend/css/style.css",
    "/static/frontend/js/app.js",
    "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css",
    "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js",
    "https://fonts.googleapis.com/css2?family=Cairo:wght@400;700&display=swap",
];

/// Configuration for the caching agent.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Store name prefix
    pub prefix: String,
    /// Version tag; bumping it retires every older store on activation
    pub version: String,
    /// Requests whose path starts with this go network-first
    pub api_prefix: String,
    /// URLs fetched and stored at install time
    pub manifest: Vec<String>,
    /// Store successful API responses so they can be served offline
    pub persist_api_responses: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            prefix: "sntf-cache".to_string(),
            version: "v1".to_string(),
            api_prefix: "/api/".to_string(),
            manifest: DEFAULT_MANIFEST.iter().map(|s| s.to_string()).collect(),
            persist_api_responses: true,
        }
    }
}

impl AgentConfig {
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_manifest<I, S>(mut self, manifest: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.manifest = manifest.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_persist_api_responses(mut self, persist: bool) -> Self {
        self.persist_api_responses = persist;
        self
    }

    /// Name of this version's store, `{prefix}-{version}`.
    pub fn store_name(&self) -> String {
        format!("{}-{}", self.prefix, self.version)
    }
}

/// Install failure. Nothing is written when install fails.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("invalid manifest entry {entry}: {message}")]
    InvalidUrl { entry: String, message: String },

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("failed to fetch {url}: status {status}")]
    Status { url: String, status: u16 },
}

/// How a request is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Network, falling back to a stored response on network failure
    NetworkFirst,
    /// Stored response, falling back to the network
    CacheFirst,
}

/// The caching agent.
///
/// Holds no per-page state; one agent serves every request it is given.
#[derive(Clone)]
pub struct CacheAgent<F> {
    config: AgentConfig,
    origin: Url,
    storage: CacheStorage,
    fetcher: F,
}

impl<F: Fetcher> CacheAgent<F> {
    /// An agent for pages served from `origin`.
    pub fn new(config: AgentConfig, origin: Url, storage: CacheStorage, fetcher: F) -> Self {
        Self {
            config,
            origin,
            storage,
            fetcher,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn storage(&self) -> &CacheStorage {
        &self.storage
    }

    /// Fetch every manifest entry and store them in this version's store.
    ///
    /// All entries are fetched before anything is written, so a failure
    /// leaves storage untouched.
    pub async fn install(&self) -> Result<(), InstallError> {
        let requests = self
            .config
            .manifest
            .iter()
            .map(|entry| self.resolve(entry).map(Request::get))
            .collect::<Result<Vec<_>, _>>()?;

        let fetched = try_join_all(requests.iter().map(|request| async move {
            let url = request.url.to_string();
            let response = self
                .fetcher
                .fetch(request)
                .await
                .map_err(|source| InstallError::Fetch {
                    url: url.clone(),
                    source,
                })?;
            if !response.is_success() {
                return Err(InstallError::Status {
                    url,
                    status: response.status,
                });
            }
            Ok((request.key(), response))
        }))
        .await?;

        let name = self.config.store_name();
        let store = self.storage.open(&name).await;
        for (key, response) in fetched {
            store.put(key, response, &self.config.version).await;
        }
        info!(store = %name, entries = requests.len(), "installed cache store");
        Ok(())
    }

    /// Delete every store except this version's. Returns the deleted names.
    pub async fn activate(&self) -> Vec<String> {
        let current = self.config.store_name();
        let mut deleted = Vec::new();
        for name in self.storage.keys().await {
            if name != current && self.storage.delete(&name).await {
                info!(store = %name, "deleted stale cache store");
                deleted.push(name);
            }
        }
        deleted
    }

    /// Classify by URL path.
    pub fn classify(&self, url: &Url) -> Strategy {
        if url.path().starts_with(&self.config.api_prefix) {
            Strategy::NetworkFirst
        } else {
            Strategy::CacheFirst
        }
    }

    /// Answer one request.
    pub async fn intercept(&self, request: &Request) -> Result<Response, FetchError> {
        match self.classify(&request.url) {
            Strategy::NetworkFirst => self.network_first(request).await,
            Strategy::CacheFirst => self.cache_first(request).await,
        }
    }

    async fn network_first(&self, request: &Request) -> Result<Response, FetchError> {
        let key = request.key();
        match self.fetcher.fetch(request).await {
            Ok(response) => {
                if self.config.persist_api_responses
                    && request.method == Method::GET
                    && response.is_success()
                {
                    self.storage
                        .open(&self.config.store_name())
                        .await
                        .put(key, response.clone(), &self.config.version)
                        .await;
                }
                Ok(response)
            }
            Err(e) => match self.lookup(&key).await {
                Some(cached) => {
                    warn!(request = %key, error = %e, "network failed, serving cached response");
                    Ok(cached)
                }
                None => Err(e),
            },
        }
    }

    async fn cache_first(&self, request: &Request) -> Result<Response, FetchError> {
        let key = request.key();
        if let Some(cached) = self.lookup(&key).await {
            debug!(request = %key, "cache hit");
            return Ok(cached);
        }
        self.fetcher.fetch(request).await
    }

    async fn lookup(&self, key: &RequestKey) -> Option<Response> {
        if *key.method() != Method::GET {
            return None;
        }
        self.storage
            .match_request(key)
            .await
            .map(|entry| entry.response)
    }

    fn resolve(&self, entry: &str) -> Result<Url, InstallError> {
        self.origin
            .join(entry)
            .map_err(|e| InstallError::InvalidUrl {
                entry: entry.to_string(),
                message: e.to_string(),
            })
    }
}
