//! Scripted network for agent tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use reqwest::Url;
use tokio::sync::{Mutex, RwLock};

use super::fetcher::{FetchError, Fetcher};
use super::request::{Request, Response};

#[derive(Default)]
struct MockState {
    routes: RwLock<HashMap<String, Response>>,
    unreachable: RwLock<HashSet<String>>,
    offline: AtomicBool,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

/// In-memory network. Unknown URLs answer 404.
#[derive(Clone, Default)]
pub struct MockFetcher {
    state: Arc<MockState>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `response`.
    pub async fn serve(&self, url: &str, response: Response) {
        self.state
            .routes
            .write()
            .await
            .insert(normalize(url), response);
    }

    /// Fail every request to `url` as unreachable.
    pub async fn break_url(&self, url: &str) {
        self.state.unreachable.write().await.insert(normalize(url));
    }

    /// Fail every request as unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.state.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of requests received, including failed ones.
    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    /// URLs requested, oldest first.
    pub async fn requested(&self) -> Vec<String> {
        self.state.requested.lock().await.clone()
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        let url = request.url.to_string();
        self.state.calls.fetch_add(1, Ordering::SeqCst);
        self.state.requested.lock().await.push(url.clone());

        if self.state.offline.load(Ordering::SeqCst)
            || self.state.unreachable.read().await.contains(&url)
        {
            return Err(FetchError::Unreachable { url });
        }

        let response = self.state.routes.read().await.get(&url).cloned();
        Ok(response.unwrap_or_else(|| Response::new(404, Some("text/plain"), "Not Found")))
    }
}

/// Same spelling as `Url` gives, so lookups match request URLs.
fn normalize(url: &str) -> String {
    Url::parse(url).map_or_else(|_| url.to_string(), |u| u.to_string())
}
