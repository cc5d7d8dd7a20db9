//! Search request lifecycle with a stale-response guard.

use std::time::Duration;

use tracing::{debug, error, info};

use crate::api::{ApiError, JourneyApi};
use crate::domain::Itinerary;

use super::criteria::{MissingField, SearchCriteria, SearchForm};

/// Where the search form currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// Nothing submitted yet.
    Idle,
    /// The last submit failed local validation; nothing was sent.
    Invalid(MissingField),
    /// Waiting for the response to request `seq`.
    Loading { seq: u64 },
    /// The latest request returned this many itineraries.
    Success { count: usize },
    /// The latest request returned no itineraries.
    Empty,
    /// The latest request failed; the user has to resubmit.
    Error,
}

/// A validated submit that should be sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    criteria: SearchCriteria,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }
}

/// What the page should show for an applied response.
#[derive(Debug)]
pub enum SearchOutcome {
    Results(Vec<Itinerary>),
    Empty,
    Failed(ApiError),
}

/// Drives the search state machine.
///
/// Every submit, valid or not, takes a new sequence number. Only the
/// response to the latest number is applied; anything older is dropped.
#[derive(Debug)]
pub struct SearchOrchestrator {
    state: SearchState,
    latest: u64,
}

impl Default for SearchOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchOrchestrator {
    pub fn new() -> Self {
        Self {
            state: SearchState::Idle,
            latest: 0,
        }
    }

    /// Validate the form and, if complete, move to `Loading`.
    ///
    /// An invalid form supersedes any in-flight request, so its response
    /// will not replace the validation message.
    pub fn submit(&mut self, form: &SearchForm) -> Result<SearchTicket, MissingField> {
        self.latest += 1;

        match SearchCriteria::from_form(form) {
            Ok(criteria) => {
                self.state = SearchState::Loading { seq: self.latest };
                debug!(seq = self.latest, ?criteria, "search submitted");
                Ok(SearchTicket {
                    seq: self.latest,
                    criteria,
                })
            }
            Err(missing) => {
                self.state = SearchState::Invalid(missing);
                debug!(seq = self.latest, %missing, "search rejected locally");
                Err(missing)
            }
        }
    }

    /// Apply the response to request `seq`.
    ///
    /// Returns `None` when `seq` is not the latest submit.
    pub fn resolve(
        &mut self,
        seq: u64,
        result: Result<Vec<Itinerary>, ApiError>,
    ) -> Option<SearchOutcome> {
        if seq != self.latest {
            debug!(seq, latest = self.latest, "discarding stale search response");
            return None;
        }

        let outcome = match result {
            Ok(itineraries) if itineraries.is_empty() => {
                self.state = SearchState::Empty;
                SearchOutcome::Empty
            }
            Ok(itineraries) => {
                info!(seq, count = itineraries.len(), "search returned results");
                self.state = SearchState::Success {
                    count: itineraries.len(),
                };
                SearchOutcome::Results(itineraries)
            }
            Err(e) => {
                error!(seq, error = %e, decoding = e.is_decoding(), "search request failed");
                self.state = SearchState::Error;
                SearchOutcome::Failed(e)
            }
        };
        Some(outcome)
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Sequence number of the latest submit.
    pub fn latest(&self) -> u64 {
        self.latest
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SearchState::Loading { .. })
    }
}

/// Send a search, failing with `ApiError::Timeout` after `timeout`.
pub async fn run_search<A: JourneyApi>(
    api: &A,
    criteria: &SearchCriteria,
    timeout: Duration,
) -> Result<Vec<Itinerary>, ApiError> {
    match tokio::time::timeout(timeout, api.search(criteria)).await {
        Ok(result) => result,
        Err(_) => Err(ApiError::Timeout { after: timeout }),
    }
}
