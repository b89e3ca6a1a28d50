//! Configuration loading
//!
//! Built-in defaults, overridden by a YAML file at `$EMX_LINK_CONFIG` or
//! `<config dir>/emx-link/config.yaml`. A missing file is fine; a malformed
//! one is an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    APP_DIR, CONFIG_FILENAME, DEFAULT_FACE, DEFAULT_ROOT_MARKERS, ENV_CONFIG, ENV_STORE,
    STORE_FILENAME,
};
use crate::error::{LinkError, Result};
use crate::resolve::MarkerRootDetector;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document categories (file extensions) that get decorations
    /// automatically; empty means every category
    pub auto_activate: Vec<String>,
    /// Entries marking a project root directory
    pub root_markers: Vec<String>,
    /// Face attached to decorated links
    pub face: String,
    /// Where the clipboard is persisted between invocations
    pub store_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_activate: Vec::new(),
            root_markers: DEFAULT_ROOT_MARKERS.iter().map(|m| m.to_string()).collect(),
            face: DEFAULT_FACE.to_string(),
            store_path: None,
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the default location
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };

        match path {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a config file; defaults when it does not exist
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|source| LinkError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Clipboard file: `$EMX_LINK_STORE`, then `store_path`, then the
    /// platform data dir
    pub fn store_path(&self) -> PathBuf {
        if let Some(path) = std::env::var_os(ENV_STORE).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        if let Some(path) = &self.store_path {
            return path.clone();
        }
        dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(STORE_FILENAME)
    }

    pub fn root_detector(&self) -> MarkerRootDetector {
        MarkerRootDetector::new(self.root_markers.iter().cloned())
    }
}

fn default_config_path() -> Option<PathBuf> {
    // Treat empty strings as unset
    if let Some(path) = std::env::var_os(ENV_CONFIG).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}
