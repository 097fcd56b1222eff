//! Statistics types.
//!
//! - [`DailyStat`] - One day of provider metrics for one sub-account
//! - [`SubAccountStats`] - Month-to-date summary derived from daily stats
//! - [`StatsWindow`] - Date range the stats are requested for

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::quota::SENTINEL;
use crate::error::CoreError;

// ============================================================================
// Daily Stat
// ============================================================================

/// Provider metrics for a single day. Absent metrics are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMetrics {
    /// Messages requested for sending.
    #[serde(default)]
    pub requests: u64,
    /// Messages delivered.
    #[serde(default)]
    pub delivered: u64,
    /// Credits used.
    #[serde(default)]
    pub used: u64,
}

/// One day of statistics for one sub-account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStat {
    /// Day the metrics belong to.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Metrics for the day.
    #[serde(default)]
    pub metrics: DailyMetrics,
}

impl DailyStat {
    /// Creates a daily stat without a date.
    pub fn new(requests: u64, delivered: u64, used: u64) -> Self {
        Self {
            date: None,
            metrics: DailyMetrics {
                requests,
                delivered,
                used,
            },
        }
    }

    /// Sets the date.
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

// ============================================================================
// Sub-account Stats
// ============================================================================

/// Month-to-date summary for one sub-account.
///
/// All-zero means "no data yet this month"; `-1` values mean the stats
/// could not be fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubAccountStats {
    /// Delivered on the most recent day.
    pub delivered: i64,
    /// Requests summed over the window.
    pub requests_this_month: i64,
    /// Credits used on the most recent day.
    pub used_today: i64,
    /// Deliveries summed over the window.
    pub delivered_this_month: i64,
    /// `delivered_this_month / requests_this_month * 100`, unrounded.
    pub reputation_percent: f64,
}

impl SubAccountStats {
    /// Stats that could not be fetched.
    pub const UNAVAILABLE: Self = Self {
        delivered: SENTINEL,
        requests_this_month: SENTINEL,
        used_today: SENTINEL,
        delivered_this_month: SENTINEL,
        reputation_percent: -1.0,
    };

    /// "No data yet this month".
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns true if these are the failure sentinel values.
    pub fn is_unavailable(&self) -> bool {
        self.requests_this_month == SENTINEL
    }
}

// ============================================================================
// Stats Window
// ============================================================================

/// Inclusive date range for a stats query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsWindow {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl StatsWindow {
    /// Creates a window, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidDateRange(format!("{start} is after {end}")));
        }
        Ok(Self { start, end })
    }

    /// First day of `today`'s month through `today`.
    pub fn month_to_date(today: NaiveDate) -> Self {
        let start = today.with_day(1).unwrap_or(today);
        Self { start, end: today }
    }

    /// Start date as `YYYY-MM-DD`.
    pub fn start_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// End date as `YYYY-MM-DD`.
    pub fn end_param(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}
