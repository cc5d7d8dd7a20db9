//! Wire types for the backend's JSON responses.
//!
//! Fields the client does not use (`route_name`, `days_operational`,
//! `score`, leg times, ...) are ignored during deserialization.

use serde::{Deserialize, Serialize};

use crate::domain::Station;

/// `GET /api/stations/` returns `Station` records directly.
pub type StationsResponse = Vec<Station>;

/// A line in `GET /api/lines/`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LineDto {
    #[serde(default)]
    pub code: String,
    pub name: String,
}

/// A stop inside a direct itinerary or a leg.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StopDto {
    pub station: String,
    #[serde(default)]
    pub station_ar: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

/// Transfer details of a connection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransferDto {
    pub station: String,
    #[serde(default)]
    pub station_ar: Option<String>,
    #[serde(default)]
    pub wait_time: String,
}

/// One train of a connection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LegDto {
    pub train: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub stops: Vec<StopDto>,
}

/// One record of `GET /api/search/`.
///
/// Direct and connection results share this shape; `type` tells them
/// apart.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItineraryDto {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub train_number: String,
    #[serde(default)]
    pub departure_time: Option<String>,
    #[serde(default)]
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub stops: Vec<StopDto>,
    #[serde(default)]
    pub transfer: Option<TransferDto>,
    #[serde(default)]
    pub legs: Vec<LegDto>,
    #[serde(default)]
    pub badges: Vec<String>,
}
