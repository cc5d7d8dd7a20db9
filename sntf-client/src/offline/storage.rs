//! Named stores of request/response pairs.

use std::collections::BTreeMap;
use std::sync::Arc;

use moka::future::Cache as MokaCache;
use tokio::sync::RwLock;

use super::request::{RequestKey, Response};

/// One stored response.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub request_key: RequestKey,
    pub response: Response,
    /// Version tag of the agent that wrote the entry.
    pub stored_at_version: String,
}

/// A named store.
///
/// Unbounded: entries leave only when the whole store is deleted.
#[derive(Clone)]
pub struct Store {
    name: Arc<str>,
    entries: MokaCache<RequestKey, CacheEntry>,
}

impl Store {
    fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            entries: MokaCache::builder().build(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn put(&self, key: RequestKey, response: Response, version: &str) {
        let entry = CacheEntry {
            request_key: key.clone(),
            response,
            stored_at_version: version.to_string(),
        };
        self.entries.insert(key, entry).await;
    }

    pub async fn get(&self, key: &RequestKey) -> Option<CacheEntry> {
        self.entries.get(key).await
    }

    /// Number of entries, after applying pending writes.
    pub async fn len(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }
}

/// All stores known to the agent, keyed by name.
#[derive(Clone, Default)]
pub struct CacheStorage {
    stores: Arc<RwLock<BTreeMap<String, Store>>>,
}

impl CacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the store called `name`, creating it if needed.
    pub async fn open(&self, name: &str) -> Store {
        if let Some(store) = self.stores.read().await.get(name) {
            return store.clone();
        }
        self.stores
            .write()
            .await
            .entry(name.to_string())
            .or_insert_with(|| Store::new(name))
            .clone()
    }

    pub async fn has(&self, name: &str) -> bool {
        self.stores.read().await.contains_key(name)
    }

    /// Names of all stores, sorted.
    pub async fn keys(&self) -> Vec<String> {
        self.stores.read().await.keys().cloned().collect()
    }

    /// Remove a store and everything in it. Returns whether it existed.
    pub async fn delete(&self, name: &str) -> bool {
        self.stores.write().await.remove(name).is_some()
    }

    /// Look `key` up across every store, in name order.
    pub async fn match_request(&self, key: &RequestKey) -> Option<CacheEntry> {
        let stores: Vec<Store> = self.stores.read().await.values().cloned().collect();
        for store in stores {
            if let Some(entry) = store.get(key).await {
                return Some(entry);
            }
        }
        None
    }
}
