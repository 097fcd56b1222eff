//! Tenants command - list configured tenants.

use anyhow::Result;
use sglimits_store::{load_credentials, Config};

use crate::output::TextFormatter;
use crate::Cli;

/// Runs the tenants command. No remote calls are made.
pub async fn run(cli: &Cli, config: &Config) -> Result<()> {
    let credentials = load_credentials(&config.credentials_path).await?;

    let formatter = TextFormatter::new(!cli.no_color);
    println!(
        "{}",
        formatter.format_tenant_list(&credentials, &config.credentials_path)
    );
    Ok(())
}
