//! Tenant credentials file.
//!
//! The file is a JSON object mapping tenant name to API key:
//!
//! ```json
//! { "acme": "SG.xxxx", "globex": "SG.yyyy" }
//! ```
//!
//! Object order is kept and becomes the output order.

use serde_json::Value;
use sglimits_core::TenantCredential;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::error::StoreError;
use crate::persistence::load_json;

/// Loads and validates the credentials file.
///
/// Any problem with the file is a [`StoreError::Credentials`]: unreadable,
/// not JSON, not an object, a non-string key, or an empty name or key.
#[instrument(skip(path), fields(path = %path.display()))]
pub async fn load_credentials(path: &Path) -> Result<Vec<TenantCredential>, StoreError> {
    let raw: Value = load_json(path)
        .await
        .map_err(|e| StoreError::credentials(path, e.to_string()))?;

    let credentials = parse_credentials(&raw).map_err(|reason| StoreError::credentials(path, reason))?;

    if credentials.is_empty() {
        warn!("Credentials file has no tenants, output will contain headers only");
    } else {
        info!(tenants = credentials.len(), "Loaded credentials");
    }
    Ok(credentials)
}

/// Validates an already-decoded credentials document.
pub fn parse_credentials(raw: &Value) -> Result<Vec<TenantCredential>, String> {
    let Value::Object(entries) = raw else {
        return Err(format!("expected a JSON object, found {}", kind_of(raw)));
    };

    entries
        .iter()
        .map(|(name, key)| {
            let Value::String(api_key) = key else {
                return Err(format!(
                    "API key for tenant {name:?} must be a string, found {}",
                    kind_of(key)
                ));
            };
            debug!(tenant = %name, "Found tenant credential");
            TenantCredential::new(name.as_str(), api_key.as_str()).map_err(|e| e.to_string())
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Tests
// ============================================================================
