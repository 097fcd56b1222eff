//! Sub-account types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A provider-managed sub-identity under a tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubAccount {
    /// Username, unique within the tenant.
    pub username: String,
    /// Whether the sub-account was enabled when listed.
    pub enabled: bool,
    /// Remaining provider fields, passed through untouched.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SubAccount {
    /// Creates an enabled sub-account with no extra fields.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            enabled: true,
            extra: serde_json::Map::new(),
        }
    }
}

/// Sub-account status as reported after the status call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubAccountStatus {
    /// Sending is allowed.
    Enabled,
    /// Sending is blocked.
    Disabled,
}

impl SubAccountStatus {
    /// Maps the provider's `disabled` flag. Only an explicit `false` counts
    /// as enabled.
    pub fn from_disabled_flag(disabled: Option<bool>) -> Self {
        match disabled {
            Some(false) => Self::Enabled,
            _ => Self::Disabled,
        }
    }

    /// Label used in the metrics file and console output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "Enabled",
            Self::Disabled => "Disabled",
        }
    }
}

impl fmt::Display for SubAccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How sub-account status is determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusMode {
    /// Write `disabled = false` first, then read the status back.
    #[default]
    Heal,
    /// Only read the status.
    ReadOnly,
}

impl StatusMode {
    /// Returns true if status checks write to the remote account.
    pub fn writes(&self) -> bool {
        matches!(self, Self::Heal)
    }
}
