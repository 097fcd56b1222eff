// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # sglimits Store
//!
//! Everything that touches the local filesystem.
//!
//! This crate provides:
//!
//! - **Config**: Run settings loaded from JSON, with defaults
//! - **Credentials**: The tenant name to API key file
//! - **MetricsExporter**: Prometheus textfile rendering and atomic write
//! - **Persistence**: Default paths and file I/O helpers
//!
//! ## Usage
//!
//! ```ignore
//! use sglimits_store::{load_credentials, Config, MetricsExporter};
//!
//! let config = Config::load()?;
//! let credentials = load_credentials(&config.credentials_path).await?;
//!
//! // ... collect ...
//!
//! MetricsExporter::new(&config.output_path).export(&result).await?;
//! ```

pub mod config;
pub mod credentials;
pub mod error;
pub mod exporter;
pub mod persistence;

pub use config::{Config, DEFAULT_API_BASE_URL};
pub use credentials::{load_credentials, parse_credentials};
pub use error::StoreError;
pub use exporter::{escape_label, MetricsExporter, METRIC_NAME, UNKNOWN_STATUS};
pub use persistence::{
    default_config_dir, default_config_path, default_credentials_path, load_json, write_atomic,
    DEFAULT_OUTPUT_PATH,
};
