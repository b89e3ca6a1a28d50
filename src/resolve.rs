//! Root resolution module
//!
//! Decides which project root accompanies a captured location, and turns a
//! link path back into a file system path:
//! - absolute paths are used as-is
//! - relative paths are joined onto the location's root when one is known
//! - otherwise the relative path is handed back unchanged for the caller to
//!   interpret against its own working directory

use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_ROOT_MARKERS;
use crate::document::Document;
use crate::edit::EditOp;
use crate::error::Result;
use crate::grammar;
use crate::location::Location;
use crate::util;

/// Strategy that finds the project root enclosing a file.
///
/// Implementations return an absolute path, or `None` when the file is not
/// inside a recognizable project.
pub trait RootDetector {
    fn detect_root(&self, active_file: &Path) -> Option<String>;
}

impl<F> RootDetector for F
where
    F: Fn(&Path) -> Option<String>,
{
    fn detect_root(&self, active_file: &Path) -> Option<String> {
        self(active_file)
    }
}

/// Finds the nearest ancestor directory holding a project marker such as
/// `.git`.
#[derive(Debug, Clone)]
pub struct MarkerRootDetector {
    markers: Vec<String>,
}

impl MarkerRootDetector {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }
}

impl Default for MarkerRootDetector {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_MARKERS.iter().copied())
    }
}

impl RootDetector for MarkerRootDetector {
    fn detect_root(&self, active_file: &Path) -> Option<String> {
        // Use dunce::canonicalize to avoid UNC prefix on Windows
        let file = dunce::canonicalize(active_file).unwrap_or_else(|_| active_file.to_path_buf());
        if !file.is_absolute() {
            return None;
        }

        let root = file
            .ancestors()
            .skip(1)
            .find(|dir| self.markers.iter().any(|marker| dir.join(marker).exists()))?;

        tracing::debug!(file = %file.display(), root = %root.display(), "detected project root");
        Some(util::normalize_root(root))
    }
}

/// File system path a location points at
pub fn resolve(location: &Location) -> PathBuf {
    let file = Path::new(&location.file);
    if file.is_absolute() {
        return file.to_path_buf();
    }

    match &location.root {
        Some(root) => Path::new(root).join(file),
        None => file.to_path_buf(),
    }
}

/// Append a root declaration to the end of `document`, on its own line
pub fn install_metalink(document: &mut Document, root: &str) -> Result<()> {
    document.apply(EditOp::append(grammar::serialize_metalink(root)))?;
    tracing::info!(root, "installed metalink");
    Ok(())
}
