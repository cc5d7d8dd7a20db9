//! HTTP client for the journey-search backend.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::domain::{Itinerary, Line, Station};
use crate::search::SearchCriteria;

use super::JourneyApi;
use super::convert::{convert_itinerary, convert_line};
use super::error::ApiError;
use super::types::{ItineraryDto, LineDto, StationsResponse};

/// Backend API client.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client with the given configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a JSON document and decode it.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ApiError::Decoding {
            message: e.to_string(),
        })
    }
}

impl JourneyApi for BackendClient {
    async fn stations(&self) -> Result<Vec<Station>, ApiError> {
        self.get_json::<StationsResponse>("/api/stations/", &[]).await
    }

    async fn lines(&self) -> Result<Vec<Line>, ApiError> {
        let lines: Vec<LineDto> = self.get_json("/api/lines/", &[]).await?;
        Ok(lines.into_iter().map(convert_line).collect())
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Itinerary>, ApiError> {
        let records: Vec<ItineraryDto> = self
            .get_json("/api/search/", &criteria.query_pairs())
            .await?;
        Ok(records.into_iter().map(convert_itinerary).collect())
    }
}
