//! HTTP routes for the offline proxy.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};
use reqwest::Url;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::offline::{FetchError, Fetcher, Request};

use super::state::ProxyState;

/// Create the proxy router: `/health`, and every other path through the
/// caching agent.
pub fn create_router<F: Fetcher + 'static>(state: ProxyState<F>) -> Router {
    Router::new()
        .route("/health", get(health))
        .fallback(forward::<F>)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Hand the request to the agent and relay its answer.
async fn forward<F: Fetcher + 'static>(
    State(state): State<ProxyState<F>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let url = upstream_url(state.agent.origin(), &uri)?;

    let request = Request {
        method,
        url,
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    };

    let answer = state.agent.intercept(&request).await?;

    let status = StatusCode::from_u16(answer.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut response = (status, answer.body).into_response();
    if let Some(content_type) = answer
        .content_type
        .and_then(|ct| HeaderValue::from_str(&ct).ok())
    {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    Ok(response)
}

/// The URL a request target stands for.
///
/// Absolute-form targets are used as given. Origin-form targets keep the
/// upstream origin and take only their path and query from the request.
fn upstream_url(origin: &Url, uri: &Uri) -> Result<Url, ProxyError> {
    if uri.scheme().is_some() && uri.authority().is_some() {
        return Url::parse(&uri.to_string()).map_err(|e| ProxyError::BadRequest {
            message: format!("Invalid URL {uri}: {e}"),
        });
    }

    let path = uri.path();
    if !path.starts_with('/') || path.starts_with("//") {
        return Err(ProxyError::BadRequest {
            message: format!("Invalid path {path}"),
        });
    }

    let mut url = origin.clone();
    url.set_path(path);
    url.set_query(uri.query());
    Ok(url)
}

/// Error body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Proxy error type.
#[derive(Debug)]
pub enum ProxyError {
    BadRequest { message: String },
    Unreachable { message: String },
}

impl From<FetchError> for ProxyError {
    fn from(e: FetchError) -> Self {
        ProxyError::Unreachable {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ProxyError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            ProxyError::Unreachable { message } => (StatusCode::BAD_GATEWAY, message),
        };

        warn!(%status, %message, "proxy request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::Request as HttpRequest;
    use tower::ServiceExt;

    use super::*;
    use crate::offline::{AgentConfig, CacheAgent, CacheStorage, MockFetcher, Response as Stored};

    const ORIGIN: &str = "http://sntf.test";
    const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";

    async fn app() -> (Router, MockFetcher) {
        let fetcher = MockFetcher::new();
        fetcher
            .serve(
                &format!("{ORIGIN}/"),
                Stored::new(200, Some("text/html; charset=utf-8"), "<html></html>"),
            )
            .await;
        fetcher
            .serve(
                &format!("{ORIGIN}/api/stations/"),
                Stored::new(200, Some("application/json"), "[]"),
            )
            .await;

        fetcher
            .serve(
                LEAFLET_CSS,
                Stored::new(200, Some("text/css"), ".leaflet-pane {}"),
            )
            .await;

        let config = AgentConfig::default().with_manifest(["/", LEAFLET_CSS]);
        let agent = CacheAgent::new(
            config,
            Url::parse(ORIGIN).unwrap(),
            CacheStorage::default(),
            fetcher.clone(),
        );
        agent.install().await.unwrap();
        agent.activate().await;

        (create_router(ProxyState::new(agent)), fetcher)
    }

    async fn get(app: &Router, path: &str) -> axum::response::Response {
        app.clone()
            .oneshot(HttpRequest::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn health_check() {
        let (app, _) = app().await;
        let response = get(&app, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn serves_installed_page_offline() {
        let (app, fetcher) = app().await;
        fetcher.set_offline(true);

        let response = get(&app, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<html></html>");
    }

    #[tokio::test]
    async fn api_goes_to_network_then_falls_back() {
        let (app, fetcher) = app().await;

        let online = get(&app, "/api/stations/").await;
        assert_eq!(online.status(), StatusCode::OK);
        let calls = fetcher.calls();

        fetcher.set_offline(true);
        let offline = get(&app, "/api/stations/").await;
        assert_eq!(offline.status(), StatusCode::OK);
        assert_eq!(fetcher.calls(), calls + 1);
    }

    #[tokio::test]
    async fn unreachable_without_cache_is_bad_gateway() {
        let (app, fetcher) = app().await;
        fetcher.set_offline(true);

        let response = get(&app, "/api/search/?from=1&to=2&time=08:00&day=0").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn upstream_status_is_relayed() {
        let (app, _) = app().await;
        let response = get(&app, "/missing").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn absolute_target_keeps_its_host() {
        let (app, fetcher) = app().await;
        fetcher.set_offline(true);

        let response = get(&app, LEAFLET_CSS).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b".leaflet-pane {}");
    }

    #[tokio::test]
    async fn origin_form_target_stays_on_upstream() {
        let (app, fetcher) = app().await;
        let before = fetcher.requested().await.len();

        get(&app, "/api/search/?from=1&to=2&time=08:00&day=0").await;

        let requested = fetcher.requested().await;
        assert_eq!(
            requested[before..],
            ["http://sntf.test/api/search/?from=1&to=2&time=08:00&day=0".to_string()]
        );
    }

    #[tokio::test]
    async fn scheme_relative_target_is_rejected() {
        let (app, fetcher) = app().await;
        let before = fetcher.calls();

        let response = get(&app, "//evil.example/steal").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(fetcher.calls(), before);
    }

    #[test]
    fn upstream_url_forms() {
        let origin = Url::parse(ORIGIN).unwrap();

        let url = upstream_url(&origin, &"/static/app.js?v=2".parse().unwrap()).unwrap();
        assert_eq!(url.as_str(), "http://sntf.test/static/app.js?v=2");

        let url = upstream_url(&origin, &LEAFLET_CSS.parse().unwrap()).unwrap();
        assert_eq!(url.as_str(), LEAFLET_CSS);

        assert!(upstream_url(&origin, &"//evil.example/steal".parse().unwrap()).is_err());
    }
}
