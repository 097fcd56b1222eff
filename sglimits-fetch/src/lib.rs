// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # sglimits Fetch
//!
//! Remote-call plumbing and the collection pipeline for sglimits.
//!
//! ## Host APIs
//!
//! - [`host::http`] - HTTP client with tracing, bearer auth, and timeouts
//!
//! ## Collection Pipeline
//!
//! - [`provider::QuotaAndStatsProvider`] - Trait for the remote account API
//! - [`collector::TenantCollector`] - Collects one tenant, absorbing failures
//! - [`coordinator::RunCoordinator`] - Collects all tenants in order
//! - [`context::CollectSettings`] - Concurrency, status mode, deadline
//!
//! ## Example
//!
//! ```ignore
//! use sglimits_fetch::{CollectSettings, RunCoordinator};
//! use sglimits_core::StatsWindow;
//!
//! let coordinator = RunCoordinator::new(provider, CollectSettings::default());
//! let window = StatsWindow::month_to_date(chrono::Local::now().date_naive());
//! let result = coordinator.run(&credentials, window).await;
//! ```

pub mod collector;
pub mod context;
pub mod coordinator;
pub mod error;
pub mod host;
pub mod provider;

// Errors
pub use error::FetchError;

// Host APIs
pub use host::http::{HttpClient, ResponseExt, DEFAULT_TIMEOUT_SECS};

// Pipeline
pub use collector::TenantCollector;
pub use context::{CollectSettings, DEFAULT_STATUS_CONCURRENCY, DEFAULT_TENANT_CONCURRENCY};
pub use coordinator::RunCoordinator;
pub use provider::{QuotaAndStatsProvider, StatsByUsername};
