//! Shared state for the proxy.

use std::sync::Arc;

use crate::offline::CacheAgent;

/// State handed to every proxy handler.
pub struct ProxyState<F> {
    /// The caching agent that answers every forwarded request
    pub agent: Arc<CacheAgent<F>>,
}

impl<F> ProxyState<F> {
    pub fn new(agent: CacheAgent<F>) -> Self {
        Self {
            agent: Arc::new(agent),
        }
    }
}

// `F` need not be `Clone`.
impl<F> Clone for ProxyState<F> {
    fn clone(&self) -> Self {
        Self {
            agent: Arc::clone(&self.agent),
        }
    }
}
