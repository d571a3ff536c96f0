//! The `path` command

use anyhow::{Context, Result};
use offline_mirror_core::{Coordinate, MirrorWriter};
use std::path::{Path, PathBuf};

/// Directory `notation` is mirrored into under `root`
pub fn mirror_path(notation: &str, root: &Path) -> Result<PathBuf> {
    let coordinate: Coordinate = notation
        .parse()
        .with_context(|| format!("Cannot compute a mirror path for '{}'", notation))?;
    Ok(MirrorWriter::new(root).module_directory(&coordinate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_path() {
        assert_eq!(
            mirror_path("org.apache.commons:commons-lang3:3.14.0", Path::new("mirror")).unwrap(),
            PathBuf::from("mirror/org/apache/commons/commons-lang3/3.14.0")
        );
        assert!(mirror_path("org.apache.commons:commons-lang3", Path::new(".")).is_err());
    }
}
