//! Per-tenant collection.
//!
//! The collector runs the remote calls for one tenant and folds their
//! results into a [`TenantRecord`]. Every failure is absorbed here: it is
//! logged, recorded on the tenant, and replaced by a sentinel or omission.

use futures::stream::{self, StreamExt};
use sglimits_core::{
    aggregate, CallFailure, Operation, StatsWindow, StatusMode, SubAccountStatus, TenantCredential,
    TenantRecord,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::context::CollectSettings;
use crate::error::FetchError;
use crate::provider::QuotaAndStatsProvider;

// ============================================================================
// Tenant Collector
// ============================================================================

/// Collects quota, sub-accounts, statuses, and stats for one tenant.
#[derive(Clone)]
pub struct TenantCollector {
    provider: Arc<dyn QuotaAndStatsProvider>,
    settings: CollectSettings,
}

impl TenantCollector {
    /// Creates a collector over the given provider.
    pub fn new(provider: Arc<dyn QuotaAndStatsProvider>, settings: CollectSettings) -> Self {
        Self { provider, settings }
    }

    /// Returns the collection settings.
    pub fn settings(&self) -> &CollectSettings {
        &self.settings
    }

    /// Collects one tenant. Never fails: degraded calls become sentinels.
    #[instrument(skip(self, credential, window), fields(tenant = %credential.name(), provider = %self.provider.id()))]
    pub async fn collect(&self, credential: &TenantCredential, window: &StatsWindow) -> TenantRecord {
        let mut record = TenantRecord::new(credential.name());
        let api_key = credential.api_key();

        match self.provider.get_quota(api_key).await {
            Ok(quota) => record.quota = quota,
            Err(e) => note_failure(&mut record, Operation::Quota, None, &e),
        }

        match self.provider.list_sub_accounts(api_key).await {
            Ok(sub_accounts) => record.sub_accounts = sub_accounts,
            Err(e) => {
                // Statuses and stats need the list.
                note_failure(&mut record, Operation::ListSubAccounts, None, &e);
                return record;
            }
        }

        debug!(count = record.sub_accounts.len(), "Listed sub-accounts");

        self.collect_statuses(&mut record, api_key).await;
        self.collect_stats(&mut record, api_key, window).await;

        record
    }

    async fn collect_statuses(&self, record: &mut TenantRecord, api_key: &str) {
        let provider = &self.provider;
        let mode = self.settings.status_mode;

        let results: Vec<(String, Result<SubAccountStatus, FetchError>)> =
            stream::iter(record.usernames())
                .map(|username| async move {
                    let result = match mode {
                        StatusMode::Heal => {
                            provider
                                .set_enabled_and_fetch_status(api_key, &username, false)
                                .await
                        }
                        StatusMode::ReadOnly => provider.fetch_status(api_key, &username).await,
                    };
                    (username, result)
                })
                .buffered(self.settings.status_concurrency.max(1))
                .collect()
                .await;

        for (username, result) in results {
            match result {
                Ok(status) => {
                    record.status_by_username.insert(username, status);
                }
                Err(e) => note_failure(record, Operation::Status, Some(&username), &e),
            }
        }
    }

    async fn collect_stats(&self, record: &mut TenantRecord, api_key: &str, window: &StatsWindow) {
        if record.sub_accounts.is_empty() {
            return;
        }

        let usernames = record.usernames();
        match self
            .provider
            .get_monthly_stats(api_key, &usernames, window)
            .await
        {
            Ok(by_username) => {
                for username in usernames {
                    let daily = by_username.get(&username).map_or(&[][..], Vec::as_slice);
                    record.stats_by_username.insert(username, aggregate(daily));
                }
            }
            Err(e) => note_failure(record, Operation::Stats, None, &e),
        }
    }
}

impl std::fmt::Debug for TenantCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantCollector")
            .field("provider", &self.provider.id())
            .field("settings", &self.settings)
            .finish()
    }
}

fn note_failure(
    record: &mut TenantRecord,
    operation: Operation,
    subaccount: Option<&str>,
    error: &FetchError,
) {
    warn!(
        tenant = %record.name,
        operation = %operation,
        subaccount = subaccount.unwrap_or("-"),
        error = %error,
        "Remote call failed, using fallback value"
    );

    let failure = match subaccount {
        Some(sub) => CallFailure::for_subaccount(operation, sub, error.to_string()),
        None => CallFailure::new(operation, error.to_string()),
    };
    record.failures.push(failure);
}
