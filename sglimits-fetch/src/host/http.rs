//! HTTP client with tracing, bearer auth, and a hard request timeout.
//!
//! This module provides a wrapped HTTP client that adds:
//! - Request/response tracing
//! - A client-wide timeout so no call can hang
//! - Status-code mapping into [`FetchError`]
//! - JSON convenience methods

use reqwest::{header, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::FetchError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// User agent string for sglimits.
const USER_AGENT: &str = concat!("sglimits/", env!("CARGO_PKG_VERSION"));

/// Maximum number of body characters quoted in error messages.
const BODY_EXCERPT_CHARS: usize = 200;

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing and timeout handling.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    ///
    /// The timeout covers the whole request, connect included.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            inner: client,
            timeout,
        })
    }

    /// Returns the configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Performs an authenticated GET and decodes the JSON body.
    #[instrument(skip(self, token), fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url, token: &str) -> Result<T, FetchError> {
        debug!("GET request");

        let response = self
            .inner
            .get(url.clone())
            .bearer_auth(token)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let body = self.success_body(response).await?;
        serde_json::from_str(&body)
            .map_err(|e| FetchError::InvalidResponse(format!("JSON error: {e}")))
    }

    /// Performs an authenticated PATCH with a JSON body.
    ///
    /// The response body is ignored; only the status matters.
    #[instrument(skip(self, token, body), fields(url = %url))]
    pub async fn patch_json<B: Serialize + ?Sized>(
        &self,
        url: &Url,
        token: &str,
        body: &B,
    ) -> Result<(), FetchError> {
        debug!("PATCH request with JSON");

        let response = self
            .inner
            .patch(url.clone())
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        self.success_body(response).await.map(|_| ())
    }

    /// Returns the body of a 2xx response, or maps the status to an error.
    async fn success_body(&self, response: Response) -> Result<String, FetchError> {
        let status = response.status();
        debug!(status = %status, "Response received");

        if response.is_rate_limited() {
            return Err(FetchError::RateLimited {
                retry_after: response.retry_after_secs(),
            });
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::AuthenticationFailed(format!(
                "API key rejected (HTTP {})",
                status.as_u16()
            )));
        }

        let body = response.text().await.map_err(|e| self.map_transport(e))?;

        if !status.is_success() {
            return Err(FetchError::InvalidResponse(format!(
                "HTTP {}: {}",
                status.as_u16(),
                excerpt(&body)
            )));
        }

        Ok(body)
    }

    fn map_transport(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout.as_secs())
        } else {
            FetchError::Http(err)
        }
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_EXCERPT_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(BODY_EXCERPT_CHARS).collect();
    format!("{cut}...")
}

// ============================================================================
// Response Extensions
// ============================================================================

/// Extension trait for Response handling.
pub trait ResponseExt {
    /// Check if the response indicates rate limiting.
    fn is_rate_limited(&self) -> bool;

    /// Get the Retry-After header value in seconds.
    fn retry_after_secs(&self) -> Option<u64>;
}

impl ResponseExt for Response {
    fn is_rate_limited(&self) -> bool {
        self.status() == StatusCode::TOO_MANY_REQUESTS
    }

    fn retry_after_secs(&self) -> Option<u64> {
        self.headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    }
}

// ============================================================================
// Tests
// ============================================================================
