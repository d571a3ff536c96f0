use std::path::PathBuf;

use thiserror::Error;

use crate::coordinate::Coordinate;

/// Every failure that aborts a mirror run.
///
/// There is no partial-success mode: once one of these is returned the run
/// stops, and files already copied stay where they are.
#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("Invalid coordinate '{0}': expected group:artifact:version")]
    InvalidCoordinate(String),

    #[error("Failed to parse descriptor {}: {message}", path.display())]
    DescriptorParse { path: PathBuf, message: String },

    #[error("Resolution failed for {target}: {message}")]
    Resolution { target: String, message: String },

    #[error("Could not find {file} for {coordinate} in any repository")]
    ArtifactNotFound { coordinate: Coordinate, file: String },

    #[error("HTTP request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No project context available: {0}")]
    MissingProjectContext(String),
}

pub type Result<T> = std::result::Result<T, MirrorError>;

impl MirrorError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MirrorError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn resolution(target: impl ToString, message: impl ToString) -> Self {
        MirrorError::Resolution {
            target: target.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn descriptor(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        MirrorError::DescriptorParse {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
