//! Network interception cache.
//!
//! A long-lived agent that owns a set of named stores. Each deployed
//! version populates its own store at install time, deletes every other
//! store at activation, then answers requests: network-first under the
//! API prefix, cache-first for everything else.

mod agent;
mod fetcher;
mod mock;
mod request;
mod storage;

pub use agent::{AgentConfig, CacheAgent, DEFAULT_MANIFEST, InstallError, Strategy};
pub use fetcher::{FetchError, Fetcher, HttpFetcher};
pub use mock::MockFetcher;
pub use request::{Request, RequestKey, Response};
pub use storage::{CacheEntry, CacheStorage, Store};
