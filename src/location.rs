//! Location model and the single-slot clipboard that holds the last capture

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LinkError, Result};

/// A line in a file, optionally anchored to a project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Path as written in the link; relative or absolute
    pub file: String,
    /// 1-based line number
    pub line: usize,
    /// Project root known when the location was captured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

impl Location {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
            root: None,
        }
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }
}

/// Single-slot holder for the most recently captured location.
///
/// Each capture overwrites the slot; nothing is merged or kept as history.
pub trait LocationStore {
    /// Current content of the slot
    fn peek(&self) -> Result<Option<Location>>;

    /// Overwrite the slot, returning what it held before
    fn replace(&mut self, location: Location) -> Result<Option<Location>>;
}

/// In-process store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slot: Option<Location>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocationStore for MemoryStore {
    fn peek(&self) -> Result<Option<Location>> {
        Ok(self.slot.clone())
    }

    fn replace(&mut self, location: Location) -> Result<Option<Location>> {
        Ok(self.slot.replace(location))
    }
}

/// Store persisted as a JSON file, so separate CLI invocations share the slot
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocationStore for FileStore {
    fn peek(&self) -> Result<Option<Location>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let location = serde_json::from_str(&content).map_err(|source| LinkError::Store {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(location))
    }

    fn replace(&mut self, location: Location) -> Result<Option<Location>> {
        // A corrupt previous slot must not block a fresh capture
        let previous = self.peek().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "discarding unreadable clipboard");
            None
        });

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&location).map_err(|source| LinkError::Store {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json)?;

        Ok(previous)
    }
}
