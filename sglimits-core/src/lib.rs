// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # sglimits Core
//!
//! Core types and pure logic shared by all sglimits crates:
//!
//! - Domain models (tenants, quota, sub-accounts, stats)
//! - The `-1` sentinel conventions
//! - Stats aggregation
//! - Error types
//!
//! ## Key Types
//!
//! - [`TenantCredential`] - Tenant name + API key (key redacted in `Debug`)
//! - [`QuotaInfo`] - Account credits, `-1` when unavailable
//! - [`SubAccount`] / [`SubAccountStatus`] - Sub-accounts and their state
//! - [`DailyStat`] / [`SubAccountStats`] - Raw and summarized usage
//! - [`TenantRecord`] / [`RunResult`] - What one run produces
//! - [`aggregate()`] - Daily stats to month-to-date summary

pub mod aggregate;
pub mod error;
pub mod models;

pub use aggregate::aggregate;
pub use error::CoreError;

pub use models::{
    // Tenants
    CallFailure,
    Operation,
    RunResult,
    TenantCredential,
    TenantRecord,
    // Quota
    QuotaInfo,
    SENTINEL,
    // Sub-accounts
    StatusMode,
    SubAccount,
    SubAccountStatus,
    // Stats
    DailyMetrics,
    DailyStat,
    StatsWindow,
    SubAccountStats,
};
