//! Reading the project manifest

use super::schema::Manifest;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::MANIFEST_FILE_NAME;

/// Load and validate a manifest
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content =
        fs::read_to_string(path).context(format!("Failed to read manifest: {}", path.display()))?;

    let manifest: Manifest =
        toml::from_str(&content).context(format!("Failed to parse manifest: {}", path.display()))?;

    if let Err(errors) = manifest.validate() {
        anyhow::bail!(
            "Manifest validation failed in {}:\n  {}",
            path.display(),
            errors.join("\n  ")
        );
    }

    Ok(manifest)
}

/// Manifest to use for a command
///
/// An explicit path must exist. Otherwise `offline-mirror.toml` in the current
/// directory is used when present.
pub fn find_manifest(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => anyhow::bail!("Manifest not found: {}", path.display()),
        None => {
            let default = PathBuf::from(MANIFEST_FILE_NAME);
            Ok(default.is_file().then_some(default))
        }
    }
}

/// Resolve a repository entry from a manifest
///
/// URLs are kept as they are. Relative directories are taken relative to the
/// manifest's own directory.
pub fn resolve_repository(entry: &str, manifest_dir: &Path) -> String {
    let entry = entry.trim();
    if is_remote(entry) || entry.starts_with("file://") {
        return entry.to_string();
    }
    let path = Path::new(entry);
    if path.is_absolute() {
        entry.to_string()
    } else {
        manifest_dir.join(path).display().to_string()
    }
}

pub fn is_remote(entry: &str) -> bool {
    entry.starts_with("http://") || entry.starts_with("https://")
}
