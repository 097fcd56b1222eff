//! Settings for a collection run.
//!
//! Everything the collector and coordinator need to know is passed in
//! explicitly through [`CollectSettings`]; there is no global state.

use sglimits_core::StatusMode;
use std::time::Duration;

/// Default number of tenants collected at once.
pub const DEFAULT_TENANT_CONCURRENCY: usize = 4;

/// Default number of status checks in flight per tenant.
pub const DEFAULT_STATUS_CONCURRENCY: usize = 4;

// ============================================================================
// Collect Settings
// ============================================================================

/// Settings for collection runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectSettings {
    /// How sub-account status is determined.
    pub status_mode: StatusMode,
    /// Tenants collected concurrently (1 = sequential).
    pub tenant_concurrency: usize,
    /// Status checks in flight per tenant (1 = sequential).
    pub status_concurrency: usize,
    /// Upper bound for the whole run. Unfinished tenants get sentinel
    /// records when it elapses.
    pub deadline: Option<Duration>,
}

impl Default for CollectSettings {
    fn default() -> Self {
        Self {
            status_mode: StatusMode::Heal,
            tenant_concurrency: DEFAULT_TENANT_CONCURRENCY,
            status_concurrency: DEFAULT_STATUS_CONCURRENCY,
            deadline: None,
        }
    }
}

impl CollectSettings {
    /// Fully sequential settings (one tenant, one status check at a time).
    pub fn sequential() -> Self {
        Self {
            tenant_concurrency: 1,
            status_concurrency: 1,
            ..Default::default()
        }
    }

    /// Sets the status mode.
    pub fn with_status_mode(mut self, mode: StatusMode) -> Self {
        self.status_mode = mode;
        self
    }

    /// Sets the tenant concurrency. Zero is treated as one.
    pub fn with_tenant_concurrency(mut self, n: usize) -> Self {
        self.tenant_concurrency = n.max(1);
        self
    }

    /// Sets the per-tenant status concurrency. Zero is treated as one.
    pub fn with_status_concurrency(mut self, n: usize) -> Self {
        self.status_concurrency = n.max(1);
        self
    }

    /// Sets the run deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
