//! Core error types for `sglimits`.

use thiserror::Error;

/// Core error type for `sglimits` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid data from an API response or input file.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Invalid date range.
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),
}
