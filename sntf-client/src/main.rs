use std::process::ExitCode;

use reqwest::Url;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use sntf_client::config::ProxyConfig;
use sntf_client::offline::{CacheAgent, CacheStorage, HttpFetcher};
use sntf_client::web::{ProxyState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sntf_client=info,tower_http=info")),
        )
        .init();

    let config = match ProxyConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let upstream = match Url::parse(&config.upstream) {
        Ok(url) => url,
        Err(e) => {
            error!(upstream = %config.upstream, error = %e, "invalid upstream URL");
            return ExitCode::FAILURE;
        }
    };

    let fetcher = match HttpFetcher::new(config.timeout) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!(error = %e, "failed to create HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let agent = CacheAgent::new(config.agent, upstream, CacheStorage::default(), fetcher);

    // A failed install keeps the previous store live, so skip activation
    match agent.install().await {
        Ok(()) => {
            agent.activate().await;
        }
        Err(e) => warn!(error = %e, "cache install failed; serving without a new store"),
    }

    let app = create_router(ProxyState::new(agent));

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!(addr = %config.bind_addr, upstream = %config.upstream, "offline proxy listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
