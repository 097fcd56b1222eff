//! SendGrid-specific errors.

use sglimits_fetch::FetchError;
use thiserror::Error;

/// SendGrid-specific errors.
#[derive(Debug, Error)]
pub enum SendGridError {
    /// The configured API base URL cannot carry endpoint paths.
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// A 2xx body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedShape(String),
}

impl From<SendGridError> for FetchError {
    fn from(err: SendGridError) -> Self {
        match err {
            SendGridError::InvalidBaseUrl(url) => FetchError::InvalidUrl(url),
            other => FetchError::InvalidResponse(other.to_string()),
        }
    }
}

impl From<url::ParseError> for SendGridError {
    fn from(err: url::ParseError) -> Self {
        SendGridError::InvalidBaseUrl(err.to_string())
    }
}
