//! In-memory backend for tests and offline development.
//!
//! Serves a fixed station and line list and answers searches from a queue
//! of scripted replies, recording every query it receives.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};

use crate::domain::{Itinerary, Line, Station};
use crate::search::SearchCriteria;

use super::JourneyApi;
use super::error::ApiError;

/// A scripted answer to one search request.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Succeed with these itineraries (possibly none).
    Results(Vec<Itinerary>),
    /// Fail with a non-success HTTP status.
    Status(u16),
    /// Fail as if the body were not valid JSON.
    Malformed,
    /// Wait, then give the inner reply.
    Delayed(Duration, Box<MockReply>),
}

#[derive(Default)]
struct MockState {
    stations: RwLock<Vec<Station>>,
    lines: RwLock<Vec<Line>>,
    stations_unavailable: AtomicBool,
    replies: Mutex<VecDeque<MockReply>>,
    queries: Mutex<Vec<Vec<(&'static str, String)>>>,
    search_calls: AtomicUsize,
}

/// Mock backend that serves scripted data.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<MockState>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve this station list.
    pub async fn set_stations(&self, stations: Vec<Station>) {
        *self.state.stations.write().await = stations;
    }

    /// Serve this line list.
    pub async fn set_lines(&self, lines: Vec<Line>) {
        *self.state.lines.write().await = lines;
    }

    /// Make the station endpoint fail with a 503.
    pub fn set_stations_unavailable(&self, unavailable: bool) {
        self.state
            .stations_unavailable
            .store(unavailable, Ordering::SeqCst);
    }

    /// Queue the reply for the next search. With an empty queue, searches
    /// succeed with no results.
    pub async fn push_reply(&self, reply: MockReply) {
        self.state.replies.lock().await.push_back(reply);
    }

    /// Number of search requests received.
    pub fn search_calls(&self) -> usize {
        self.state.search_calls.load(Ordering::SeqCst)
    }

    /// Query parameters of every search received, oldest first.
    pub async fn queries(&self) -> Vec<Vec<(&'static str, String)>> {
        self.state.queries.lock().await.clone()
    }

    async fn answer(reply: MockReply) -> Result<Vec<Itinerary>, ApiError> {
        let mut reply = reply;
        loop {
            match reply {
                MockReply::Results(itineraries) => return Ok(itineraries),
                MockReply::Status(status) => {
                    return Err(ApiError::Status {
                        status,
                        body: String::new(),
                    });
                }
                MockReply::Malformed => {
                    return Err(ApiError::Decoding {
                        message: "expected value at line 1 column 1".to_string(),
                    });
                }
                MockReply::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    reply = *inner;
                }
            }
        }
    }
}

impl JourneyApi for MockBackend {
    async fn stations(&self) -> Result<Vec<Station>, ApiError> {
        if self.state.stations_unavailable.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 503,
                body: "Service Unavailable".to_string(),
            });
        }
        Ok(self.state.stations.read().await.clone())
    }

    async fn lines(&self) -> Result<Vec<Line>, ApiError> {
        Ok(self.state.lines.read().await.clone())
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Itinerary>, ApiError> {
        self.state.search_calls.fetch_add(1, Ordering::SeqCst);
        self.state.queries.lock().await.push(criteria.query_pairs());

        let reply = self.state.replies.lock().await.pop_front();
        match reply {
            Some(reply) => Self::answer(reply).await,
            None => Ok(Vec::new()),
        }
    }
}
