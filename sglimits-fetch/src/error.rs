//! Fetch error types.

use std::time::Duration;
use thiserror::Error;

/// Error type for remote calls.
///
/// The `Display` output is the human-readable cause recorded when a call
/// degrades to a sentinel value.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Rate limited by the provider.
    #[error("Rate limited, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds the provider asked us to wait.
        retry_after: Option<u64>,
    },

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid response from the provider.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid request URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The run deadline elapsed before the call completed.
    #[error("Run deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}

impl FetchError {
    /// Returns true if the provider rejected the credential.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }
}

impl From<url::ParseError> for FetchError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}
