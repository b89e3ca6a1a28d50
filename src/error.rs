//! Error types shared by every link operation

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::edit::ValidationError;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, LinkError>;

/// Failures reported by capture, paste, navigation and their plumbing.
///
/// None of these are fatal: the failing operation leaves the clipboard,
/// documents and decorations as they were.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Capture on a document that has no backing file
    #[error("document has no backing file")]
    NoBackingFile,

    /// Paste before anything was captured
    #[error("no location has been captured yet")]
    EmptyClipboard,

    /// The resolved link target does not exist
    #[error("link target does not exist: {}", .path.display())]
    TargetMissing { path: PathBuf },

    #[error(transparent)]
    Edit(#[from] ValidationError),

    #[error("invalid config file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("corrupt clipboard file {}: {source}", .path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<LinkError> for io::Error {
    fn from(err: LinkError) -> Self {
        match err {
            LinkError::Io(inner) => inner,
            LinkError::TargetMissing { .. } => io::Error::new(io::ErrorKind::NotFound, err.to_string()),
            LinkError::NoBackingFile | LinkError::EmptyClipboard => {
                io::Error::new(io::ErrorKind::Other, err.to_string())
            }
            LinkError::Edit(_) | LinkError::Config { .. } | LinkError::Store { .. } => {
                io::Error::new(io::ErrorKind::InvalidData, err.to_string())
            }
        }
    }
}
