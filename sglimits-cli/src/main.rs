// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! sglimits CLI - SendGrid quota and sub-account monitoring for Prometheus.
//!
//! # Examples
//!
//! ```bash
//! # Collect every tenant and write the textfile-collector file
//! sglimits
//!
//! # Same, but print the metrics instead of writing them
//! sglimits run --stdout
//!
//! # Only read sub-account status, never re-enable
//! sglimits --read-only-status
//!
//! # List configured tenants
//! sglimits tenants
//!
//! # Show the effective configuration
//! sglimits --timeout 15 config
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sglimits_store::StoreError;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{config, run, tenants};

// ============================================================================
// CLI Definition
// ============================================================================

/// sglimits CLI - SendGrid limits exporter.
#[derive(Parser)]
#[command(name = "sglimits")]
#[command(about = "SendGrid quota and sub-account exporter for Prometheus")]
#[command(long_about = r#"
sglimits reads a credentials file mapping tenant names to SendGrid API keys,
collects each tenant's credit quota, sub-account status, and month-to-date
sending stats, and writes them as a Prometheus textfile.

Failed API calls never abort the run: the affected values are exported as -1.

Examples:
  sglimits                       # Collect and write the metrics file
  sglimits run --stdout          # Print metrics instead of writing
  sglimits --read-only-status    # Never re-enable sub-accounts
  sglimits tenants               # List configured tenants
"#)]
#[command(version)]
#[command(author = "sglimits contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'run' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (JSON).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Credentials file mapping tenant name to API key.
    #[arg(long, global = true, value_name = "PATH")]
    pub credentials: Option<PathBuf>,

    /// Metrics file to write.
    #[arg(long, short, global = true, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Number of tenants collected at once.
    #[arg(long, global = true, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Only read sub-account status; never re-enable sub-accounts.
    #[arg(long, global = true)]
    pub read_only_status: bool,

    /// Append logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no console logs or progress summary; a log file still
    /// receives logs).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Collect all tenants and export metrics (default if no command specified).
    #[command(visible_alias = "r")]
    Run(run::RunArgs),

    /// List configured tenants without calling the API.
    #[command(visible_alias = "t")]
    Tenants,

    /// Print the effective configuration as JSON.
    Config,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Credentials file missing or malformed.
    Credentials = 2,
    /// Metrics file could not be written.
    Export = 3,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<StoreError>() {
            Some(StoreError::Credentials { .. }) => Self::Credentials,
            Some(StoreError::Export { .. }) => Self::Export,
            _ => Self::Error,
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

/// Where log events are written.
#[derive(Debug, PartialEq, Eq)]
enum LogSink<'a> {
    Stderr,
    File(&'a Path),
}

/// Quiet mode only silences the console. A configured log file always
/// receives events.
fn log_sink(quiet: bool, log_file: Option<&Path>) -> Option<LogSink<'_>> {
    match log_file {
        Some(path) => Some(LogSink::File(path)),
        None if quiet => None,
        None => Some(LogSink::Stderr),
    }
}

fn setup_logging(verbose: bool, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let Some(sink) = log_sink(quiet, log_file) else {
        return Ok(()); // Quiet and no log file
    };

    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.is_empty() => EnvFilter::new(directives),
        _ if verbose => EnvFilter::new("sglimits=debug,info"),
        _ => EnvFilter::new("sglimits=warn"),
    };

    match sink {
        LogSink::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .with(filter)
                .init();
        }
        LogSink::Stderr => {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(false)
                        .without_time()
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    }

    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let result = dispatch(&cli).await;

    match result {
        Ok(()) => ExitCode::Success.into(),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            ExitCode::for_error(&e).into()
        }
    }
}

async fn dispatch(cli: &Cli) -> Result<()> {
    let effective = commands::effective_config(cli)?;
    setup_logging(cli.verbose, cli.quiet, effective.log_file.as_deref())?;

    match &cli.command {
        Some(Commands::Run(args)) => run::run(args, cli, &effective).await,
        Some(Commands::Tenants) => tenants::run(cli, &effective).await,
        Some(Commands::Config) => config::run(&effective),
        None => {
            // Default to run command
            run::run(&run::RunArgs::default(), cli, &effective).await
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command_defaults_to_run() {
        let cli = Cli::try_parse_from(["sglimits"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.read_only_status);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sglimits",
            "run",
            "--stdout",
            "--timeout",
            "3",
            "--read-only-status",
        ])
        .unwrap();
        assert_eq!(cli.timeout, Some(3));
        assert!(cli.read_only_status);
        assert!(matches!(cli.command, Some(Commands::Run(ref args)) if args.stdout));
    }

    #[test]
    fn test_quiet_keeps_log_file() {
        let path = Path::new("/var/log/sglimits.log");
        assert_eq!(log_sink(true, Some(path)), Some(LogSink::File(path)));
        assert_eq!(log_sink(false, Some(path)), Some(LogSink::File(path)));
    }

    #[test]
    fn test_quiet_without_log_file_silences_console() {
        assert_eq!(log_sink(true, None), None);
        assert_eq!(log_sink(false, None), Some(LogSink::Stderr));
    }

    #[test]
    fn test_exit_codes_from_store_errors() {
        let creds = anyhow::Error::new(StoreError::credentials("/tmp/c.json", "not an object"));
        assert_eq!(ExitCode::for_error(&creds), ExitCode::Credentials);

        let export = anyhow::Error::new(StoreError::Export {
            path: "/tmp/out.prom".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        });
        assert_eq!(ExitCode::for_error(&export), ExitCode::Export);

        let other = anyhow::anyhow!("something else");
        assert_eq!(ExitCode::for_error(&other), ExitCode::Error);
    }

    #[test]
    fn test_context_keeps_exit_code() {
        let err = anyhow::Error::new(StoreError::credentials("/tmp/c.json", "bad"))
            .context("loading tenants");
        assert_eq!(ExitCode::for_error(&err), ExitCode::Credentials);
    }
}
