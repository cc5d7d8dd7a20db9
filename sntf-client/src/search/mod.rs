//! Search form validation and the search request state machine.
//!
//! `Idle → Validating → Loading → {Success, Empty, Error}`, re-entering
//! `Validating` on the next submit. Validation runs inside `submit`, so
//! the only states held between events are the ones in `SearchState`.
//! Every submit takes a sequence number; a response is applied only if it
//! carries the latest one, so a slow earlier request can never overwrite
//! a newer one.

mod criteria;
mod error;
mod orchestrator;

pub use criteria::{MissingField, SearchCriteria, SearchForm};
pub use error::SearchError;
pub use orchestrator::{
    SearchOrchestrator, SearchOutcome, SearchState, SearchTicket, run_search,
};
