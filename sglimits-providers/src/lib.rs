// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # sglimits Providers
//!
//! Concrete [`QuotaAndStatsProvider`](sglimits_fetch::QuotaAndStatsProvider)
//! implementations.
//!
//! ## Supported Providers
//!
//! | Provider | Quota | Sub-accounts | Status write | Stats |
//! |----------|-------|--------------|--------------|-------|
//! | SendGrid (v3) | ✅ | ✅ | ✅ | ✅ |
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use sglimits_fetch::{CollectSettings, RunCoordinator};
//! use sglimits_providers::SendGridClient;
//!
//! let client = SendGridClient::new()?;
//! let coordinator = RunCoordinator::new(Arc::new(client), CollectSettings::default());
//! ```

pub mod sendgrid;

pub use sendgrid::{SendGridClient, SendGridError, SENDGRID_API_BASE, SENDGRID_PROVIDER_ID};
