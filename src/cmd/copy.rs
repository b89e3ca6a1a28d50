//! Capture location command module

use std::io;
use std::path::Path;

use emx_link::util::display_path;
use emx_link::{Config, Document, FileStore, LinkEngine};

pub fn run(config: &Config, file: &Path, line: usize) -> io::Result<()> {
    // Links store absolute paths; use dunce to avoid UNC prefix on Windows
    let file = dunce::canonicalize(file).map_err(|e| {
        io::Error::new(e.kind(), format!("Cannot capture '{}': {}", display_path(file), e))
    })?;
    let doc = Document::open(&file)?;

    check_line(&doc, &file, line)?;

    let store = FileStore::new(config.store_path());
    let mut engine = LinkEngine::new(store, config.root_detector());
    let location = engine.capture(&doc, doc.offset_of_line(line))?;

    println!("{}:{}", location.file, location.line);
    if let Some(root) = &location.root {
        eprintln!("  root: {}", root);
    }

    Ok(())
}

fn check_line(doc: &Document, file: &Path, line: usize) -> io::Result<()> {
    let last_line = line_count(doc).max(1);
    if line == 0 || line > last_line {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Line {} is outside {} (1-{})", line, display_path(file), last_line),
        ));
    }
    Ok(())
}

/// Number of lines, a final newline terminating the last one
fn line_count(doc: &Document) -> usize {
    let lines = doc.line_number_at(doc.len());
    if doc.text().ends_with('\n') {
        lines - 1
    } else {
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emx_link::LocationStore;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_check_line_range() {
        let file = Path::new("x.py");
        let doc = Document::new("a\nb\n");
        assert!(check_line(&doc, file, 1).is_ok());
        assert!(check_line(&doc, file, 2).is_ok());
        assert_eq!(
            check_line(&doc, file, 0).unwrap_err().kind(),
            io::ErrorKind::InvalidInput
        );
        assert!(check_line(&doc, file, 3).is_err());
    }

    #[test]
    fn test_check_line_without_final_newline() {
        let file = Path::new("x.py");
        assert!(check_line(&Document::new("a\nb"), file, 2).is_ok());
        assert!(check_line(&Document::new(""), file, 1).is_ok());
    }

    #[test]
    fn test_run_stores_location() {
        if std::env::var_os(emx_link::constants::ENV_STORE).is_some() {
            return;
        }
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        let file = dir.path().join("lib.rs");
        fs::write(&file, "one\ntwo\nthree\n").unwrap();

        let store_path = dir.path().join("clipboard.json");
        let config = Config {
            store_path: Some(store_path.clone()),
            ..Config::default()
        };

        run(&config, &file, 2).unwrap();
        assert!(run(&config, &file, 4).is_err());

        let stored = FileStore::new(store_path).peek().unwrap().unwrap();
        assert_eq!(Path::new(&stored.file), dunce::canonicalize(&file).unwrap());
        assert_eq!(stored.line, 2);
        assert!(stored.root.is_some());
    }
}
