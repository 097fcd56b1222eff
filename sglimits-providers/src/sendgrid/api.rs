//! SendGrid v3 API client.

use serde_json::{json, Value};
use sglimits_core::{QuotaInfo, StatsWindow, SubAccount, SubAccountStatus};
use sglimits_fetch::{FetchError, HttpClient, StatsByUsername};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use super::error::SendGridError;
use super::parser::{
    group_stats, parse_subuser_status, parse_subusers, CreditsResponse, StatsDay, SubuserEntry,
};

// ============================================================================
// Constants
// ============================================================================

/// SendGrid API base URL.
pub const SENDGRID_API_BASE: &str = "https://api.sendgrid.com";

/// Most usernames the stats endpoint accepts in one request.
pub const MAX_SUBUSERS_PER_STATS_REQUEST: usize = 10;

const CREDITS_PATH: &[&str] = &["v3", "user", "credits"];
const SUBUSERS_PATH: &[&str] = &["v3", "subusers"];
const SUBUSER_STATS_PATH: &[&str] = &["v3", "subusers", "stats"];

// ============================================================================
// API Client
// ============================================================================

/// SendGrid API client.
#[derive(Debug, Clone)]
pub struct SendGridClient {
    http: HttpClient,
    base: Url,
}

impl SendGridClient {
    /// Creates a client against the public API with the default timeout.
    pub fn new() -> Result<Self, SendGridError> {
        Self::with_base_url(
            SENDGRID_API_BASE,
            Duration::from_secs(sglimits_fetch::DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Creates a client against `base_url` with a per-request timeout.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, SendGridError> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(SendGridError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = HttpClient::with_timeout(timeout)
            .map_err(|e| SendGridError::Client(e.to_string()))?;

        Ok(Self { http, base })
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Builds an endpoint URL. Each segment is percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SendGridError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| SendGridError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn subuser_url(&self, username: &str) -> Result<Url, SendGridError> {
        let mut segments = SUBUSERS_PATH.to_vec();
        segments.push(username);
        self.endpoint(&segments)
    }

    /// Fetches account credits.
    #[instrument(skip(self, api_key))]
    pub async fn credits(&self, api_key: &str) -> Result<QuotaInfo, FetchError> {
        let url = self.endpoint(CREDITS_PATH)?;
        let credits: CreditsResponse = self.http.get_json(&url, api_key).await?;
        debug!(total = ?credits.total, used = ?credits.used, "Credits fetched");
        Ok(credits.to_quota()?)
    }

    /// Lists subusers.
    #[instrument(skip(self, api_key))]
    pub async fn subusers(&self, api_key: &str) -> Result<Vec<SubAccount>, FetchError> {
        let url = self.endpoint(SUBUSERS_PATH)?;
        let entries: Vec<SubuserEntry> = self.http.get_json(&url, api_key).await?;
        Ok(parse_subusers(entries))
    }

    /// Sets a subuser's disabled flag.
    #[instrument(skip(self, api_key))]
    pub async fn set_disabled(
        &self,
        api_key: &str,
        username: &str,
        disabled: bool,
    ) -> Result<(), FetchError> {
        let url = self.subuser_url(username)?;
        self.http
            .patch_json(&url, api_key, &json!({ "disabled": disabled }))
            .await
    }

    /// Reads a subuser's status.
    #[instrument(skip(self, api_key))]
    pub async fn subuser_status(
        &self,
        api_key: &str,
        username: &str,
    ) -> Result<SubAccountStatus, FetchError> {
        let url = self.subuser_url(username)?;
        let body: Value = self.http.get_json(&url, api_key).await?;
        Ok(parse_subuser_status(&body, username)?)
    }

    /// Fetches daily stats for `usernames` over `window`.
    ///
    /// Usernames are requested in chunks the endpoint accepts. Any chunk
    /// failing fails the whole call.
    #[instrument(skip(self, api_key, usernames), fields(count = usernames.len()))]
    pub async fn subuser_stats(
        &self,
        api_key: &str,
        usernames: &[String],
        window: &StatsWindow,
    ) -> Result<StatsByUsername, FetchError> {
        let mut grouped = StatsByUsername::new();

        for chunk in usernames.chunks(MAX_SUBUSERS_PER_STATS_REQUEST) {
            let url = self.stats_url(chunk, window)?;
            let days: Vec<StatsDay> = self.http.get_json(&url, api_key).await?;
            debug!(chunk = chunk.len(), days = days.len(), "Stats chunk fetched");
            group_stats(days, chunk, &mut grouped);
        }

        Ok(grouped)
    }

    fn stats_url(&self, chunk: &[String], window: &StatsWindow) -> Result<Url, SendGridError> {
        let mut url = self.endpoint(SUBUSER_STATS_PATH)?;
        {
            let mut query = url.query_pairs_mut();
            for username in chunk {
                query.append_pair("subusers", username);
            }
            query
                .append_pair("start_date", &window.start_param())
                .append_pair("end_date", &window.end_param());
        }
        Ok(url)
    }
}

// ============================================================================
// Tests
// ============================================================================
