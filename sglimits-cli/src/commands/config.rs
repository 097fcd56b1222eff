//! Config command - show the effective configuration.

use anyhow::Result;
use sglimits_store::Config;

/// Runs the config command.
pub fn run(config: &Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
