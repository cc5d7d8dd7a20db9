//! Backend client error types.

use std::time::Duration;

/// Errors from talking to the backend.
///
/// Transport and decoding failures end up as the same generic message on
/// the page; they are kept apart here for logging.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network unreachable, connection reset, TLS failure, ...
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Decoding { message: String },

    /// No answer within the configured timeout
    #[error("request timed out after {after:?}")]
    Timeout { after: Duration },
}

impl ApiError {
    /// Whether the response arrived but could not be decoded.
    pub fn is_decoding(&self) -> bool {
        matches!(self, ApiError::Decoding { .. })
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decoding {
            message: err.to_string(),
        }
    }
}
