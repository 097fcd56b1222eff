//! In-memory provider used by the pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use sglimits_core::{
    DailyStat, QuotaInfo, StatsWindow, SubAccount, SubAccountStatus, TenantCredential,
};
use sglimits_fetch::{FetchError, QuotaAndStatsProvider, StatsByUsername};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Scripted provider keyed by API key. Anything not scripted fails.
#[derive(Default)]
pub struct FakeProvider {
    quotas: HashMap<String, QuotaInfo>,
    sub_accounts: HashMap<String, Vec<SubAccount>>,
    statuses: HashMap<(String, String), SubAccountStatus>,
    stats: HashMap<String, StatsByUsername>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quota(mut self, key: &str, total: i64, used: i64) -> Self {
        self.quotas.insert(key.to_string(), QuotaInfo::new(total, used));
        self
    }

    pub fn sub_accounts(mut self, key: &str, usernames: &[&str]) -> Self {
        self.sub_accounts.insert(
            key.to_string(),
            usernames.iter().map(|u| SubAccount::new(*u)).collect(),
        );
        self
    }

    pub fn status(mut self, key: &str, username: &str, status: SubAccountStatus) -> Self {
        self.statuses
            .insert((key.to_string(), username.to_string()), status);
        self
    }

    pub fn stats(mut self, key: &str, username: &str, daily: Vec<DailyStat>) -> Self {
        self.stats
            .entry(key.to_string())
            .or_default()
            .insert(username.to_string(), daily);
        self
    }

    /// Stats call succeeds with no data for anybody.
    pub fn empty_stats(mut self, key: &str) -> Self {
        self.stats.entry(key.to_string()).or_default();
        self
    }

    /// Delays every call made with this key.
    pub fn delay(mut self, key: &str, delay: Duration) -> Self {
        self.delays.insert(key.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    async fn pause(&self, key: &str) {
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
    }
}

fn unscripted(what: &str) -> FetchError {
    FetchError::InvalidResponse(format!("HTTP 500: no fixture for {what}"))
}

#[async_trait]
impl QuotaAndStatsProvider for FakeProvider {
    fn id(&self) -> &str {
        "fake"
    }

    async fn get_quota(&self, api_key: &str) -> Result<QuotaInfo, FetchError> {
        self.record(format!("quota:{api_key}"));
        self.pause(api_key).await;
        self.quotas
            .get(api_key)
            .copied()
            .ok_or_else(|| unscripted("quota"))
    }

    async fn list_sub_accounts(&self, api_key: &str) -> Result<Vec<SubAccount>, FetchError> {
        self.record(format!("list:{api_key}"));
        self.sub_accounts
            .get(api_key)
            .cloned()
            .ok_or_else(|| unscripted("sub-accounts"))
    }

    async fn set_enabled_and_fetch_status(
        &self,
        api_key: &str,
        username: &str,
        disabled: bool,
    ) -> Result<SubAccountStatus, FetchError> {
        self.record(format!("heal:{api_key}:{username}:{disabled}"));
        self.statuses
            .get(&(api_key.to_string(), username.to_string()))
            .copied()
            .ok_or_else(|| unscripted(username))
    }

    async fn fetch_status(
        &self,
        api_key: &str,
        username: &str,
    ) -> Result<SubAccountStatus, FetchError> {
        self.record(format!("status:{api_key}:{username}"));
        self.statuses
            .get(&(api_key.to_string(), username.to_string()))
            .copied()
            .ok_or_else(|| unscripted(username))
    }

    async fn get_monthly_stats(
        &self,
        api_key: &str,
        usernames: &[String],
        _window: &StatsWindow,
    ) -> Result<StatsByUsername, FetchError> {
        self.record(format!("stats:{api_key}:{}", usernames.join(",")));
        self.stats
            .get(api_key)
            .cloned()
            .ok_or_else(|| unscripted("stats"))
    }
}

pub fn credential(name: &str, key: &str) -> TenantCredential {
    TenantCredential::new(name, key).unwrap()
}

pub fn window() -> StatsWindow {
    StatsWindow::month_to_date(chrono::NaiveDate::from_ymd_opt(2024, 3, 17).unwrap())
}
