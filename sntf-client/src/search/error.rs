//! Search error types.

use crate::api::ApiError;

use super::MissingField;

/// Why a search produced no results.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The form is incomplete; nothing was sent
    #[error("incomplete search: {0}")]
    Validation(#[from] MissingField),

    /// The request failed in transport or decoding
    #[error("search request failed: {0}")]
    Backend(#[from] ApiError),
}
