//! HTTP surface of the offline proxy.

mod routes;
mod state;

pub use routes::{ProxyError, create_router};
pub use state::ProxyState;
