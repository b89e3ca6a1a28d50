//! Detect project root command module

use std::io;
use std::path::Path;

use emx_link::util::display_path;
use emx_link::{Config, RootDetector};

pub fn run(config: &Config, file: &Path) -> io::Result<()> {
    match config.root_detector().detect_root(file) {
        Some(root) => {
            println!("{}", root);
            Ok(())
        }
        None => Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!(
                "No project root found for '{}' (markers: {})",
                display_path(file),
                config.root_markers.join(", ")
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_with_marker(marker: &str) -> Config {
        Config {
            root_markers: vec![marker.to_string()],
            ..Config::default()
        }
    }

    #[test]
    fn test_run_finds_marker() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".emx-link-root")).unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        let file = dir.path().join("src").join("lib.rs");
        fs::write(&file, "").unwrap();

        run(&config_with_marker(".emx-link-root"), &file).unwrap();
    }

    #[test]
    fn test_run_without_root() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("lib.rs");
        fs::write(&file, "").unwrap();

        let err = run(&config_with_marker(".emx-link-no-such-marker"), &file).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains(".emx-link-no-such-marker"));
    }
}
