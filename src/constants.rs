//! Constants for emx-link
//!
//! Link syntax fragments, file names, and environment variable names used
//! throughout the codebase.

// === Link Syntax ===

/// Opening delimiter shared by every link form
pub const LINK_OPEN: &str = "#[";

/// Closing delimiter shared by every link form
pub const LINK_CLOSE: &str = "]";

/// Separator between the file and the line number: `#[file:L12]`
pub const LINE_MARKER: &str = ":L";

/// Prefix of a root declaration: `#[:meta:root:/path/]`
pub const METALINK_PREFIX: &str = ":meta:root:";

/// Newline character
pub const NEWLINE: &str = "\n";

// === Project Detection ===

/// Directory entries that mark a project root
pub const DEFAULT_ROOT_MARKERS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    ".bzr",
    "_darcs",
    ".projectile",
    ".project",
];

// === Decoration ===

/// Face name attached to decorated link spans
pub const DEFAULT_FACE: &str = "emx-link";

// === File and Directory Names ===

/// Subdirectory under the platform config/data dirs
pub const APP_DIR: &str = "emx-link";

/// Config file name inside the config dir
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Clipboard file name inside the data dir
pub const STORE_FILENAME: &str = "clipboard.json";

// === Environment Variables ===

/// Overrides the config file location
pub const ENV_CONFIG: &str = "EMX_LINK_CONFIG";

/// Overrides the clipboard file location
pub const ENV_STORE: &str = "EMX_LINK_STORE";

/// Log filter for the binary (tracing EnvFilter syntax)
pub const ENV_LOG: &str = "EMX_LINK_LOG";

/// Filter used when `EMX_LINK_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";
