//! The agent's network side.

use std::future::Future;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use super::request::{Request, Response};

/// Failure to get any response from the network.
///
/// A response with an error status is not a `FetchError`.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("network unreachable: {url}")]
    Unreachable { url: String },
}

/// Sends requests to the network.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, request: &Request) -> impl Future<Output = Result<Response, FetchError>> + Send;
}

/// `Fetcher` over a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone())
            .body(request.body.clone());
        if let Some(content_type) = &request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        Ok(Response {
            status,
            content_type,
            body,
        })
    }
}
