//! Backend journey-search API.
//!
//! Three read-only endpoints: the station list and line list (fetched
//! once at startup) and the itinerary search. `BackendClient` talks to
//! the real backend over HTTP; `MockBackend` serves scripted responses.

mod client;
mod convert;
mod error;
mod mock;
mod types;

use std::future::Future;

pub use client::BackendClient;
pub use convert::convert_itinerary;
pub use error::ApiError;
pub use mock::{MockBackend, MockReply};
pub use types::{ItineraryDto, LegDto, LineDto, StopDto, TransferDto};

use crate::domain::{Itinerary, Line, Station};
use crate::search::SearchCriteria;

/// The backend contract consumed by the page.
pub trait JourneyApi: Send + Sync {
    /// `GET /api/stations/`
    fn stations(&self) -> impl Future<Output = Result<Vec<Station>, ApiError>> + Send;

    /// `GET /api/lines/`
    fn lines(&self) -> impl Future<Output = Result<Vec<Line>, ApiError>> + Send;

    /// `GET /api/search/?from=..&to=..&time=..&day=..`
    ///
    /// An empty list is a valid answer, not an error.
    fn search(
        &self,
        criteria: &SearchCriteria,
    ) -> impl Future<Output = Result<Vec<Itinerary>, ApiError>> + Send;
}
