//! SendGrid response types and their mapping onto the core model.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use sglimits_core::{DailyMetrics, DailyStat, QuotaInfo, SubAccount, SubAccountStatus};
use sglimits_fetch::StatsByUsername;
use tracing::{debug, warn};

use super::error::SendGridError;

// ============================================================================
// Credits
// ============================================================================

/// Response from `GET /v3/user/credits`.
#[derive(Debug, Default, Deserialize)]
pub struct CreditsResponse {
    /// Credits in the current period.
    #[serde(default)]
    pub total: Option<i64>,
    /// Credits consumed so far.
    #[serde(default)]
    pub used: Option<i64>,
    /// Credits left.
    #[serde(default)]
    pub remain: Option<i64>,
    /// How often the allowance resets.
    #[serde(default)]
    pub reset_frequency: Option<String>,
    /// Date of the next reset.
    #[serde(default)]
    pub next_reset: Option<String>,
}

impl CreditsResponse {
    /// Converts to [`QuotaInfo`].
    ///
    /// Both `total` and `used` are required; a body missing either is an
    /// unusable answer for the whole call.
    pub fn to_quota(&self) -> Result<QuotaInfo, SendGridError> {
        match (self.total, self.used) {
            (Some(total), Some(used)) => Ok(QuotaInfo::new(total, used)),
            (total, used) => Err(SendGridError::UnexpectedShape(format!(
                "credits response missing {}",
                match (total, used) {
                    (None, None) => "total and used",
                    (None, Some(_)) => "total",
                    _ => "used",
                }
            ))),
        }
    }
}

// ============================================================================
// Subusers
// ============================================================================

/// One entry of `GET /v3/subusers`.
#[derive(Debug, Deserialize)]
pub struct SubuserEntry {
    /// Login name of the subuser.
    #[serde(default)]
    pub username: Option<String>,
    /// Whether sending is blocked.
    #[serde(default)]
    pub disabled: Option<bool>,
    /// Everything else (id, email, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Maps subuser entries to sub-accounts, dropping entries without a username.
pub fn parse_subusers(entries: Vec<SubuserEntry>) -> Vec<SubAccount> {
    let total = entries.len();
    let sub_accounts: Vec<SubAccount> = entries
        .into_iter()
        .filter_map(|entry| {
            let Some(username) = entry.username.filter(|u| !u.is_empty()) else {
                warn!("Skipping subuser entry without a username");
                return None;
            };
            Some(SubAccount {
                username,
                enabled: entry.disabled != Some(true),
                extra: entry.extra,
            })
        })
        .collect();

    debug!(total, kept = sub_accounts.len(), "Parsed subusers");
    sub_accounts
}

/// Reads the status out of a single-subuser response.
///
/// The body is normally an object with a `disabled` flag. A list is also
/// accepted, in which case the entry for `username` (or the only entry) is
/// used.
pub fn parse_subuser_status(body: &Value, username: &str) -> Result<SubAccountStatus, SendGridError> {
    let entry = match body {
        Value::Object(_) => body,
        Value::Array(entries) => entries
            .iter()
            .find(|e| e.get("username").and_then(Value::as_str) == Some(username))
            .or_else(|| if entries.len() == 1 { entries.first() } else { None })
            .ok_or_else(|| {
                SendGridError::UnexpectedShape(format!("no status entry for {username}"))
            })?,
        other => {
            return Err(SendGridError::UnexpectedShape(format!(
                "subuser status is not an object: {other}"
            )));
        }
    };

    Ok(SubAccountStatus::from_disabled_flag(
        entry.get("disabled").and_then(Value::as_bool),
    ))
}

// ============================================================================
// Stats
// ============================================================================

/// One day of `GET /v3/subusers/stats`.
#[derive(Debug, Deserialize)]
pub struct StatsDay {
    /// Day the entries belong to.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Per-subuser entries for the day.
    #[serde(default)]
    pub stats: Vec<StatsEntry>,
}

/// One subuser's metrics for one day.
#[derive(Debug, Deserialize)]
pub struct StatsEntry {
    /// Subuser the metrics belong to.
    #[serde(default)]
    pub name: Option<String>,
    /// Metrics for the day.
    #[serde(default)]
    pub metrics: DailyMetrics,
}

/// Groups a stats response by username into `into`.
///
/// `requested` is the chunk of usernames the response answers. Entries for
/// names outside it are dropped. An unnamed entry only counts when the
/// chunk holds exactly one username.
pub fn group_stats(days: Vec<StatsDay>, requested: &[String], into: &mut StatsByUsername) {
    let sole = match requested {
        [only] => Some(only.as_str()),
        _ => None,
    };

    for day in days {
        for entry in day.stats {
            let owner = match entry.name.as_deref() {
                Some(name) if requested.iter().any(|u| u == name) => name,
                Some(name) => {
                    debug!(name, "Dropping stats for unrequested subuser");
                    continue;
                }
                None => match sole {
                    Some(only) => only,
                    None => {
                        debug!("Dropping unnamed stats entry");
                        continue;
                    }
                },
            };

            into.entry(owner.to_string()).or_default().push(DailyStat {
                date: day.date,
                metrics: entry.metrics,
            });
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
