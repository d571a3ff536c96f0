//! Module coordinates
//!
//! A [`Coordinate`] is the `group:artifact:version` triple that identifies one
//! resolvable module. It keys every collection the resolver builds, and it is
//! the only input to the mirror directory layout:
//!
//! ```text
//! com.example:lib:1.2  →  com/example/lib/1.2
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{MirrorError, Result};

/// A parsed `group:artifact:version` triple
///
/// Construction validates every segment, so a `Coordinate` always maps to a
/// directory strictly below the mirror root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    group: String,
    artifact: String,
    version: String,
}

impl Coordinate {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self> {
        let coordinate = Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        };

        let group_ok = coordinate.group.split('.').all(is_valid_segment);
        if !group_ok || !is_valid_segment(&coordinate.artifact) || !is_valid_segment(&coordinate.version)
        {
            return Err(MirrorError::InvalidCoordinate(coordinate.notation()));
        }

        Ok(coordinate)
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// `group:artifact:version`
    pub fn notation(&self) -> String {
        format!("{}:{}:{}", self.group, self.artifact, self.version)
    }

    /// `group:artifact`, the key used when picking one version per module
    pub fn module_key(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }

    /// Repository-relative directory with `/` separators (`com/example/lib/1.2`)
    pub fn repository_path(&self) -> String {
        format!(
            "{}/{}/{}",
            self.group.replace('.', "/"),
            self.artifact,
            self.version
        )
    }

    /// Directory of this module below `root`
    pub fn module_dir(&self, root: &Path) -> PathBuf {
        let mut dir = root.to_path_buf();
        dir.extend(self.group.split('.'));
        dir.push(&self.artifact);
        dir.push(&self.version);
        dir
    }

    /// Conventional file name: `artifact-version[-classifier].extension`
    pub fn file_name(&self, classifier: Option<&str>, extension: &str) -> String {
        match classifier {
            Some(classifier) => format!(
                "{}-{}-{}.{}",
                self.artifact, self.version, classifier, extension
            ),
            None => format!("{}-{}.{}", self.artifact, self.version, extension),
        }
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ':' | '/' | '\\'))
}

impl FromStr for Coordinate {
    type Err = MirrorError;

    fn from_str(notation: &str) -> Result<Self> {
        let parts: Vec<&str> = notation.trim().split(':').collect();
        match parts.as_slice() {
            [group, artifact, version] => Coordinate::new(*group, *artifact, *version),
            _ => Err(MirrorError::InvalidCoordinate(notation.to_string())),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}
