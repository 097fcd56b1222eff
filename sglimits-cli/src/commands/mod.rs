//! CLI command implementations.

pub mod config;
pub mod run;
pub mod tenants;

use anyhow::Result;
use sglimits_core::StatusMode;
use sglimits_store::Config;

use crate::Cli;

/// Loads the config file and applies command-line overrides.
pub fn effective_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    apply_overrides(&mut config, cli);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(path) = &cli.credentials {
        config.credentials_path.clone_from(path);
    }
    if let Some(path) = &cli.output {
        config.output_path.clone_from(path);
    }
    if let Some(secs) = cli.timeout {
        config.request_timeout_secs = secs;
    }
    if let Some(n) = cli.concurrency {
        config.tenant_concurrency = n;
    }
    if cli.read_only_status {
        config.status_mode = StatusMode::ReadOnly;
    }
    if cli.log_file.is_some() {
        config.log_file.clone_from(&cli.log_file);
    }
}

// ============================================================================
// Tests
// ============================================================================
