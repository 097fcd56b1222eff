//! Tenant-level types.
//!
//! - [`TenantCredential`] - Tenant name + API key
//! - [`TenantRecord`] - Everything collected for one tenant in one run
//! - [`CallFailure`] - A remote call that degraded to a sentinel
//! - [`RunResult`] - Ordered tenant records for one run

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::quota::QuotaInfo;
use super::stats::SubAccountStats;
use super::subaccount::{SubAccount, SubAccountStatus};
use crate::error::CoreError;

// ============================================================================
// Tenant Credential
// ============================================================================

/// A tenant's name and the API key used to query its account.
///
/// `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct TenantCredential {
    name: String,
    api_key: String,
}

impl TenantCredential {
    /// Creates a credential, rejecting empty names or keys.
    pub fn new(name: impl Into<String>, api_key: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        let api_key = api_key.into();

        if name.trim().is_empty() {
            return Err(CoreError::InvalidData("tenant name is empty".to_string()));
        }
        if api_key.trim().is_empty() {
            return Err(CoreError::InvalidData(format!(
                "API key for tenant '{name}' is empty"
            )));
        }

        Ok(Self { name, api_key })
    }

    /// The tenant name (unique key, used as the `project_name` label).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The API key presented to the provider.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for TenantCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantCredential")
            .field("name", &self.name)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Call Failure
// ============================================================================

/// The remote operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Account credits lookup.
    Quota,
    /// Sub-account enumeration.
    ListSubAccounts,
    /// Sub-account status (optionally preceded by the enable write).
    Status,
    /// Month-to-date sub-account statistics.
    Stats,
    /// The run deadline elapsed before the tenant finished.
    Deadline,
}

impl Operation {
    /// Returns a short label for logs and console output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Quota => "quota",
            Self::ListSubAccounts => "list sub-accounts",
            Self::Status => "sub-account status",
            Self::Stats => "sub-account stats",
            Self::Deadline => "run deadline",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A remote call that failed and was replaced by a sentinel or omission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallFailure {
    /// Which operation failed.
    pub operation: Operation,
    /// Sub-account the call was about, if any.
    pub subaccount: Option<String>,
    /// Human-readable cause.
    pub cause: String,
}

impl CallFailure {
    /// Creates a tenant-level failure.
    pub fn new(operation: Operation, cause: impl Into<String>) -> Self {
        Self {
            operation,
            subaccount: None,
            cause: cause.into(),
        }
    }

    /// Creates a failure scoped to one sub-account.
    pub fn for_subaccount(
        operation: Operation,
        subaccount: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            subaccount: Some(subaccount.into()),
            cause: cause.into(),
        }
    }
}

impl fmt::Display for CallFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subaccount {
            Some(sub) => write!(f, "{} [{}]: {}", self.operation, sub, self.cause),
            None => write!(f, "{}: {}", self.operation, self.cause),
        }
    }
}

// ============================================================================
// Tenant Record
// ============================================================================

/// Everything collected for one tenant during one run.
///
/// A record exists for every configured credential. Total failure shows up
/// as sentinel quota values and empty collections, never as a missing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantRecord {
    /// Tenant name.
    pub name: String,
    /// Account-level credits.
    pub quota: QuotaInfo,
    /// Sub-accounts in provider order.
    pub sub_accounts: Vec<SubAccount>,
    /// Month-to-date stats by username. Empty when the stats call failed.
    pub stats_by_username: BTreeMap<String, SubAccountStats>,
    /// Status by username. A missing entry means the status call failed.
    pub status_by_username: BTreeMap<String, SubAccountStatus>,
    /// Remote calls that degraded during collection.
    #[serde(default)]
    pub failures: Vec<CallFailure>,
}

impl TenantRecord {
    /// Creates an empty record with sentinel quota.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quota: QuotaInfo::UNAVAILABLE,
            sub_accounts: Vec::new(),
            stats_by_username: BTreeMap::new(),
            status_by_username: BTreeMap::new(),
            failures: Vec::new(),
        }
    }

    /// Creates an all-sentinel record carrying a single failure.
    pub fn unavailable(name: impl Into<String>, failure: CallFailure) -> Self {
        let mut record = Self::new(name);
        record.failures.push(failure);
        record
    }

    /// Returns the status for a sub-account, if it was determined.
    pub fn status_of(&self, username: &str) -> Option<SubAccountStatus> {
        self.status_by_username.get(username).copied()
    }

    /// Returns the stats for a sub-account, or the `-1` sentinel when the
    /// stats call did not produce an entry for it.
    pub fn stats_of(&self, username: &str) -> SubAccountStats {
        self.stats_by_username
            .get(username)
            .copied()
            .unwrap_or(SubAccountStats::UNAVAILABLE)
    }

    /// Returns the usernames of all sub-accounts in provider order.
    pub fn usernames(&self) -> Vec<String> {
        self.sub_accounts.iter().map(|s| s.username.clone()).collect()
    }

    /// Returns true if every remote call for this tenant succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

// ============================================================================
// Run Result
// ============================================================================

/// All tenant records of one run, in credential order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Tenant records in credential-file order.
    pub tenants: Vec<TenantRecord>,
}

impl RunResult {
    /// Creates a run result from ordered tenant records.
    pub fn new(tenants: Vec<TenantRecord>) -> Self {
        Self { tenants }
    }

    /// Number of tenants.
    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    /// Returns true if no tenants were configured.
    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }

    /// Iterates tenant records in order.
    pub fn iter(&self) -> impl Iterator<Item = &TenantRecord> {
        self.tenants.iter()
    }

    /// Total number of degraded remote calls across all tenants.
    pub fn failure_count(&self) -> usize {
        self.tenants.iter().map(|t| t.failures.len()).sum()
    }
}
