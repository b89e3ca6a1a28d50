//! Utility functions for path handling

use std::path::{Path, MAIN_SEPARATOR};

/// Display a path with forward slashes (cross-platform standard)
/// Converts Windows backslashes to forward slashes for consistent output
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Canonical text form of a root directory: exactly one trailing separator
pub fn normalize_root(root: &Path) -> String {
    let text = root.to_string_lossy();
    let trimmed = text.trim_end_matches(|c| c == '/' || c == MAIN_SEPARATOR);
    format!("{}{}", trimmed, MAIN_SEPARATOR)
}

/// `file` rewritten relative to `root`, when `file` is absolute and lies
/// strictly underneath `root`. Comparison is per path component, so
/// `/a/bc/x` is not underneath `/a/b`.
pub fn relative_to_root(file: &str, root: &str) -> Option<String> {
    let file = Path::new(file);
    if !file.is_absolute() {
        return None;
    }

    let relative = file.strip_prefix(root).ok()?;
    if relative.as_os_str().is_empty() {
        return None;
    }
    Some(display_path(relative))
}
