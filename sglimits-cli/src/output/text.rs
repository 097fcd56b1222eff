//! Text output formatting with progress bars and colors.

use sglimits_core::{QuotaInfo, RunResult, SubAccountStatus, TenantCredential, TenantRecord};
use std::path::Path;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

// Progress bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Text formatter for the console progress summary.
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 10,
        }
    }

    /// Formats the whole run, one block per tenant.
    pub fn format_run(&self, result: &RunResult) -> String {
        if result.is_empty() {
            return self.dim("No tenants configured");
        }

        let blocks: Vec<String> = result.iter().map(|t| self.format_tenant(t)).collect();
        let mut out = blocks.join("\n\n");

        let failures = result.failure_count();
        if failures > 0 {
            out.push_str("\n\n");
            out.push_str(&self.yellow(&format!(
                "{failures} remote call(s) failed; see log for details"
            )));
        }
        out
    }

    /// Formats one tenant: quota, then each sub-account with its status.
    pub fn format_tenant(&self, tenant: &TenantRecord) -> String {
        let mut lines = vec![self.bold(&tenant.name), self.format_quota(&tenant.quota)];

        if tenant.sub_accounts.is_empty() {
            lines.push(format!("  {}", self.dim("no sub-accounts")));
        }

        for sub in &tenant.sub_accounts {
            let status = self.format_status(tenant.status_of(&sub.username));
            let stats = tenant.stats_of(&sub.username);
            let detail = if stats.is_unavailable() {
                self.dim("stats unavailable")
            } else {
                self.dim(&format!(
                    "{} requests, {} delivered, {:.2}% delivered",
                    stats.requests_this_month, stats.delivered_this_month, stats.reputation_percent
                ))
            };
            lines.push(format!("  {:<24} {:<10} {}", sub.username, status, detail));
        }

        for failure in &tenant.failures {
            lines.push(format!("  {}", self.red(&format!("✗ {failure}"))));
        }

        lines.join("\n")
    }

    /// Formats the tenant list for the `tenants` command. Keys never appear.
    pub fn format_tenant_list(&self, credentials: &[TenantCredential], source: &Path) -> String {
        let mut lines = vec![format!(
            "{} {}",
            self.bold(&format!("{} tenant(s)", credentials.len())),
            self.dim(&format!("from {}", source.display()))
        )];
        lines.extend(credentials.iter().map(|c| format!("  • {}", c.name())));
        lines.join("\n")
    }

    /// Formats quota as a remaining-credits bar.
    fn format_quota(&self, quota: &QuotaInfo) -> String {
        let Some(remaining) = quota.remaining() else {
            return format!("  Credits: {}", self.red("unavailable"));
        };

        let percent_remaining = if quota.total > 0 {
            remaining as f64 / quota.total as f64 * 100.0
        } else {
            0.0
        };
        let bar = self.progress_bar(percent_remaining);
        let text = self.color_for_percent(
            percent_remaining,
            &format!("{remaining} of {} left", quota.total),
        );
        format!("  Credits: {bar} {text}")
    }

    fn format_status(&self, status: Option<SubAccountStatus>) -> String {
        // Pad before coloring so escape codes do not break alignment.
        match status {
            Some(SubAccountStatus::Enabled) => self.green(&format!("{:<10}", "Enabled")),
            Some(SubAccountStatus::Disabled) => self.red(&format!("{:<10}", "Disabled")),
            None => self.yellow(&format!("{:<10}", "Unknown")),
        }
    }

    /// Formats a progress bar.
    pub fn progress_bar(&self, percent_remaining: f64) -> String {
        let clamped = percent_remaining.clamp(0.0, 100.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let filled = ((clamped / 100.0) * self.bar_width as f64).round() as usize;
        let empty = self.bar_width.saturating_sub(filled);

        let bar = format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        );

        self.color_for_percent(percent_remaining, &bar)
    }

    fn color_for_percent(&self, percent: f64, text: &str) -> String {
        if percent < 20.0 {
            self.red(text)
        } else if percent < 50.0 {
            self.yellow(text)
        } else {
            self.green(text)
        }
    }

    // ========================================================================
    // Color Helpers
    // ========================================================================

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }
}

// ============================================================================
// Tests
// ============================================================================
