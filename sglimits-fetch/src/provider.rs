//! The remote capability the collection pipeline talks to.
//!
//! A provider wraps the account API of a transactional-email service. Each
//! operation returns a typed value or a [`FetchError`] describing the cause;
//! callers turn errors into sentinels and keep going.

use async_trait::async_trait;
use sglimits_core::{DailyStat, QuotaInfo, StatsWindow, SubAccount, SubAccountStatus};
use std::collections::HashMap;

use crate::error::FetchError;

/// Daily stats grouped by sub-account username, in provider order.
pub type StatsByUsername = HashMap<String, Vec<DailyStat>>;

/// Quota, sub-account, and stats operations for one provider.
///
/// ## Implementing a Provider
///
/// ```ignore
/// struct StaticProvider;
///
/// #[async_trait]
/// impl QuotaAndStatsProvider for StaticProvider {
///     fn id(&self) -> &str {
///         "static"
///     }
///
///     async fn get_quota(&self, _api_key: &str) -> Result<QuotaInfo, FetchError> {
///         Ok(QuotaInfo::new(100, 0))
///     }
///
///     // ...
/// }
/// ```
#[async_trait]
pub trait QuotaAndStatsProvider: Send + Sync {
    /// Short identifier used in logs (e.g. `"sendgrid"`).
    fn id(&self) -> &str;

    /// Fetches account-level total/used credits.
    async fn get_quota(&self, api_key: &str) -> Result<QuotaInfo, FetchError>;

    /// Lists the tenant's sub-accounts.
    async fn list_sub_accounts(&self, api_key: &str) -> Result<Vec<SubAccount>, FetchError>;

    /// Writes the sub-account's disabled flag, then reads its status back.
    ///
    /// This mutates the remote account.
    async fn set_enabled_and_fetch_status(
        &self,
        api_key: &str,
        username: &str,
        disabled: bool,
    ) -> Result<SubAccountStatus, FetchError>;

    /// Reads the sub-account's status without writing anything.
    async fn fetch_status(
        &self,
        api_key: &str,
        username: &str,
    ) -> Result<SubAccountStatus, FetchError>;

    /// Fetches daily stats for the given sub-accounts over `window`.
    ///
    /// Usernames with no data may be missing from the result.
    async fn get_monthly_stats(
        &self,
        api_key: &str,
        usernames: &[String],
        window: &StatsWindow,
    ) -> Result<StatsByUsername, FetchError>;
}
