//! File persistence helpers.
//!
//! Default locations and the atomic write used for the metrics file.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::process;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::StoreError;

// ============================================================================
// Default Paths
// ============================================================================

/// Default metrics file, inside the node-exporter textfile directory.
pub const DEFAULT_OUTPUT_PATH: &str = "/var/lib/prometheus/node-exporter/check_sendgrid_limits.prom";

/// Returns the default configuration directory.
///
/// - Linux: `~/.config/sglimits`
/// - macOS: `~/Library/Application Support/sglimits`
/// - Windows: `%APPDATA%\sglimits`
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sglimits")
}

/// Returns the default configuration file path.
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.json")
}

/// Returns the default credentials file path.
pub fn default_credentials_path() -> PathBuf {
    default_config_dir().join("credentials.json")
}

// ============================================================================
// File Operations
// ============================================================================

/// Loads data from a JSON file.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    debug!(path = %path.display(), "Loading JSON file");

    let content = tokio::fs::read_to_string(path).await?;
    let data = serde_json::from_str(&content)?;

    debug!(path = %path.display(), "JSON file loaded");
    Ok(data)
}

/// Replaces `path` with `contents` in one step.
///
/// The data goes to a temp file in the same directory, is flushed and
/// synced, then renamed over the target. Readers see the old file or the
/// new one, never a partial write. The temp file is removed on failure.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    tokio::fs::create_dir_all(&dir).await?;

    let temp_path = dir.join(temp_name(path));
    debug!(path = %path.display(), temp = %temp_path.display(), "Writing file atomically");

    let result = write_and_rename(&temp_path, path, contents).await;
    if result.is_err() {
        // Best effort; the original error is what matters.
        let _ = tokio::fs::remove_file(&temp_path).await;
    }
    result
}

async fn write_and_rename(temp_path: &Path, path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .await?;
    file.write_all(contents).await?;
    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::rename(temp_path, path).await
}

fn temp_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map_or_else(|| "output".into(), |n| n.to_string_lossy());
    format!(".{file_name}.{}.tmp", process::id())
}

// ============================================================================
// Tests
// ============================================================================
