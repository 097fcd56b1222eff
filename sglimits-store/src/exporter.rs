//! Prometheus textfile export.
//!
//! Renders a [`RunResult`] as a single gauge family and writes it where the
//! node-exporter textfile collector picks it up.

use sglimits_core::{RunResult, TenantRecord};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::error::StoreError;
use crate::persistence::write_atomic;

/// Name of the exported gauge family.
pub const METRIC_NAME: &str = "sendgrid_limits_metric";

/// Status value for sub-accounts whose status could not be read.
pub const UNKNOWN_STATUS: &str = "Unknown";

// ============================================================================
// Metrics Exporter
// ============================================================================

/// Writes run results to the metrics file.
#[derive(Debug, Clone)]
pub struct MetricsExporter {
    output_path: PathBuf,
}

impl MetricsExporter {
    /// Creates an exporter writing to `output_path`.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    /// Destination path.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Renders the exposition document. Same input, same output.
    pub fn render(result: &RunResult) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# HELP {METRIC_NAME} gauge metric");
        let _ = writeln!(out, "# TYPE {METRIC_NAME} gauge");

        for tenant in result.iter() {
            render_tenant(&mut out, tenant);
        }
        out
    }

    /// Renders `result` and atomically replaces the metrics file.
    #[instrument(skip(self, result), fields(path = %self.output_path.display()))]
    pub async fn export(&self, result: &RunResult) -> Result<(), StoreError> {
        let document = Self::render(result);

        write_atomic(&self.output_path, document.as_bytes())
            .await
            .map_err(|source| StoreError::Export {
                path: self.output_path.clone(),
                source,
            })?;

        info!(
            tenants = result.len(),
            bytes = document.len(),
            "Metrics file written"
        );
        Ok(())
    }
}

fn render_tenant(out: &mut String, tenant: &TenantRecord) {
    let project = escape_label(&tenant.name);

    let _ = writeln!(
        out,
        "{METRIC_NAME}{{project_name=\"{project}\", mails=\"Total\"}} {}",
        tenant.quota.total
    );
    let _ = writeln!(
        out,
        "{METRIC_NAME}{{project_name=\"{project}\", mails=\"Used\"}} {}",
        tenant.quota.used
    );

    for sub in &tenant.sub_accounts {
        let username = escape_label(&sub.username);
        let labels = format!("project_name=\"{project}\", subaccount=\"{username}\"");

        let status = tenant
            .status_of(&sub.username)
            .map_or(UNKNOWN_STATUS, |s| s.as_str());
        let stats = tenant.stats_of(&sub.username);

        let _ = writeln!(out, "{METRIC_NAME}{{{labels}, metric=\"Status\"}} \"{status}\"");
        let _ = writeln!(
            out,
            "{METRIC_NAME}{{{labels}, metric=\"Requests\"}} {}",
            stats.requests_this_month
        );
        let _ = writeln!(
            out,
            "{METRIC_NAME}{{{labels}, metric=\"DeliveredLastMonth\"}} {}",
            stats.delivered_this_month
        );
        let _ = writeln!(
            out,
            "{METRIC_NAME}{{{labels}, metric=\"ReputationPercent\"}} {:.2}",
            stats.reputation_percent
        );
    }
}

/// Escapes a label value for the text exposition format.
pub fn escape_label(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ============================================================================
// Tests
// ============================================================================
