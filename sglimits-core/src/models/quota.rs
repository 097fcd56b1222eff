//! Account quota.

use serde::{Deserialize, Serialize};

/// Sentinel meaning "could not be determined this run".
pub const SENTINEL: i64 = -1;

/// Account-level email credits.
///
/// `-1` in either field is the failure sentinel, never a real value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaInfo {
    /// Total credits for the current period.
    pub total: i64,
    /// Credits used in the current period.
    pub used: i64,
}

impl QuotaInfo {
    /// Quota that could not be fetched.
    pub const UNAVAILABLE: Self = Self {
        total: SENTINEL,
        used: SENTINEL,
    };

    /// Creates a quota.
    pub fn new(total: i64, used: i64) -> Self {
        Self { total, used }
    }

    /// Returns true if both values are real (not sentinel).
    pub fn is_available(&self) -> bool {
        self.total != SENTINEL && self.used != SENTINEL
    }

    /// Remaining credits, if known.
    pub fn remaining(&self) -> Option<i64> {
        self.is_available().then(|| (self.total - self.used).max(0))
    }
}

impl Default for QuotaInfo {
    fn default() -> Self {
        Self::UNAVAILABLE
    }
}
