//! Directory path management for offline-mirror
//!
//! Downloads from remote repositories are cached under the config directory,
//! logs live under the data directory.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the base offline-mirror directory (~/.config/offline-mirror/)
pub fn get_base_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Failed to get config directory")?
        .join("offline-mirror"))
}

/// Get the download cache directory (~/.config/offline-mirror/cache/)
///
/// Each remote repository gets its own subdirectory.
pub fn get_cache_dir() -> Result<PathBuf> {
    Ok(get_base_dir()?.join("cache"))
}

/// Get the log directory (~/.local/share/offline-mirror/logs/ on Linux)
pub fn get_log_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .context("Failed to determine data directory (XDG_DATA_HOME or platform equivalent)")?;

    Ok(data_dir.join("offline-mirror").join("logs"))
}
