//! Domain models for sglimits.
//!
//! ## Submodules
//!
//! - [`quota`] - Account credits and the `-1` sentinel
//! - [`subaccount`] - Sub-accounts, their status, and status mode
//! - [`stats`] - Daily stats, month-to-date summaries, date windows
//! - [`tenant`] - Credentials, tenant records, run results

mod quota;
mod stats;
mod subaccount;
mod tenant;

pub use quota::{QuotaInfo, SENTINEL};
pub use stats::{DailyMetrics, DailyStat, StatsWindow, SubAccountStats};
pub use subaccount::{StatusMode, SubAccount, SubAccountStatus};
pub use tenant::{CallFailure, Operation, RunResult, TenantCredential, TenantRecord};
