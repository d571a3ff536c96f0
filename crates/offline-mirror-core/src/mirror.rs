//! Writing the resolved closure into a mirror directory
//!
//! Layout: `<root>/<group with dots as slashes>/<artifact>/<version>/<file name>`.
//! Writes are additive and overwrite in place; nothing is ever pruned.

use std::path::{Path, PathBuf};

use crate::coordinate::Coordinate;
use crate::error::{MirrorError, Result};
use crate::resolver::ResolvedFileSet;

/// What a mirror pass wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorSummary {
    pub modules: usize,
    pub files: usize,
}

/// Copies resolved files under a mirror root
#[derive(Debug, Clone)]
pub struct MirrorWriter {
    root: PathBuf,
}

impl MirrorWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory a coordinate's files are written to
    pub fn module_directory(&self, coordinate: &Coordinate) -> PathBuf {
        coordinate.module_dir(&self.root)
    }

    /// Copy every file of `files` into its module directory
    pub fn write(&self, files: &ResolvedFileSet) -> Result<MirrorSummary> {
        let mut summary = MirrorSummary::default();

        for (coordinate, sources) in files.iter() {
            let directory = self.module_directory(coordinate);
            std::fs::create_dir_all(&directory).map_err(|e| MirrorError::io(&directory, e))?;

            for source in sources {
                let name = source.file_name().ok_or_else(|| {
                    MirrorError::resolution(coordinate, format!("{} has no file name", source.display()))
                })?;
                let output = directory.join(name);

                // Copying a file onto itself truncates it
                if is_same_file(source, &output) {
                    tracing::debug!("{} is already in place", output.display());
                    summary.files += 1;
                    continue;
                }

                tracing::info!("Copying {} to {}", source.display(), output.display());
                std::fs::copy(source, &output).map_err(|e| MirrorError::io(source, e))?;
                summary.files += 1;
            }

            summary.modules += 1;
        }

        Ok(summary)
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
