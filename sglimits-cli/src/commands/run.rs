//! Run command - collect every tenant and export metrics.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use sglimits_core::StatsWindow;
use sglimits_fetch::RunCoordinator;
use sglimits_providers::SendGridClient;
use sglimits_store::{load_credentials, Config, MetricsExporter};
use std::sync::Arc;
use tracing::{info, warn};

use crate::output::TextFormatter;
use crate::Cli;

/// Arguments for the run command.
#[derive(Args, Default)]
pub struct RunArgs {
    /// Print the metrics document to stdout instead of writing the file.
    #[arg(long)]
    pub stdout: bool,
}

/// Runs the run command.
pub async fn run(args: &RunArgs, cli: &Cli, config: &Config) -> Result<()> {
    let credentials = load_credentials(&config.credentials_path).await?;

    let client = SendGridClient::with_base_url(&config.api_base_url, config.request_timeout())
        .context("cannot set up the SendGrid client")?;
    let settings = config.collect_settings();
    if settings.status_mode.writes() {
        info!("Status checks will re-enable sub-accounts before reading them");
    }

    let coordinator = RunCoordinator::new(Arc::new(client), settings);
    let window = StatsWindow::month_to_date(Local::now().date_naive());
    let result = coordinator.run(&credentials, window).await;

    let failures = result.failure_count();
    if failures > 0 {
        warn!(failures, "Some remote calls failed; affected values exported as -1");
    }

    if args.stdout {
        print!("{}", MetricsExporter::render(&result));
        return Ok(());
    }

    if !cli.quiet {
        let formatter = TextFormatter::new(!cli.no_color);
        println!("{}", formatter.format_run(&result));
    }

    MetricsExporter::new(&config.output_path)
        .export(&result)
        .await?;
    Ok(())
}
