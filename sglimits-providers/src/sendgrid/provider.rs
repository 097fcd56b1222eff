//! [`QuotaAndStatsProvider`] over the SendGrid client.

use async_trait::async_trait;
use sglimits_core::{QuotaInfo, StatsWindow, SubAccount, SubAccountStatus};
use sglimits_fetch::{FetchError, QuotaAndStatsProvider, StatsByUsername};

use super::api::SendGridClient;

/// Provider identifier used in logs.
pub const SENDGRID_PROVIDER_ID: &str = "sendgrid";

#[async_trait]
impl QuotaAndStatsProvider for SendGridClient {
    fn id(&self) -> &str {
        SENDGRID_PROVIDER_ID
    }

    async fn get_quota(&self, api_key: &str) -> Result<QuotaInfo, FetchError> {
        self.credits(api_key).await
    }

    async fn list_sub_accounts(&self, api_key: &str) -> Result<Vec<SubAccount>, FetchError> {
        self.subusers(api_key).await
    }

    async fn set_enabled_and_fetch_status(
        &self,
        api_key: &str,
        username: &str,
        disabled: bool,
    ) -> Result<SubAccountStatus, FetchError> {
        self.set_disabled(api_key, username, disabled).await?;
        self.subuser_status(api_key, username).await
    }

    async fn fetch_status(
        &self,
        api_key: &str,
        username: &str,
    ) -> Result<SubAccountStatus, FetchError> {
        self.subuser_status(api_key, username).await
    }

    async fn get_monthly_stats(
        &self,
        api_key: &str,
        usernames: &[String],
        window: &StatsWindow,
    ) -> Result<StatsByUsername, FetchError> {
        self.subuser_stats(api_key, usernames, window).await
    }
}
