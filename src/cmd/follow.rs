//! Follow link command module

use std::io;
use std::path::Path;

use emx_link::grammar;
use emx_link::util::display_path;
use emx_link::{Document, Jump, Navigator};

pub fn run(note: &Path, line: usize, column: Option<usize>) -> io::Result<()> {
    let doc = Document::open(note)?;

    let position = link_position(&doc, line, column).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no line {}", display_path(note), line),
        )
    })?;

    let mut navigator = Navigator::new();
    navigator.add_hook(|jump: &Jump| {
        tracing::debug!(path = %jump.path.display(), offset = jump.position, "jump target");
    });

    match navigator.follow(&doc, position)? {
        Some(jump) => {
            println!("{}:{}", display_path(&jump.path), jump.line);
            Ok(())
        }
        None => Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("No link at {}:{}", display_path(note), line),
        )),
    }
}

/// Offset to follow on 1-based `line`: `column` bytes into it, or the first
/// location link when no column is given. `None` when the line does not exist.
fn link_position(doc: &Document, line: usize, column: Option<usize>) -> Option<usize> {
    let line_start = doc.offset_of_line(line);
    if doc.line_number_at(line_start) != line {
        return None;
    }
    let bounds = doc.line_bounds(line_start);

    let position = match column {
        Some(column) => (bounds.start + column).min(bounds.end),
        None => grammar::scan_links(&doc.text()[bounds.clone()])
            .into_iter()
            .find(|span| span.kind == grammar::LinkKind::Location)
            .map(|span| bounds.start + span.range.start)
            .unwrap_or(bounds.start),
    };
    Some(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_link_position_rejects_missing_lines() {
        let doc = Document::new("one\ntwo\n");
        assert_eq!(link_position(&doc, 0, None), None);
        assert_eq!(link_position(&doc, 4, None), None);
        assert_eq!(link_position(&doc, 2, None), Some(4));
    }

    #[test]
    fn test_link_position_defaults_to_first_location_link() {
        let doc = Document::new("intro\nsee #[todo] and #[a.rs:L3] or #[b.rs:L1]\n");
        let position = link_position(&doc, 2, None).unwrap();
        assert!(doc.text()[position..].starts_with("#[a.rs:L3]"));
    }

    #[test]
    fn test_link_position_column_clamps_to_line() {
        let doc = Document::new("ab #[a.rs:L3]\nnext\n");
        assert_eq!(link_position(&doc, 1, Some(5)), Some(5));
        assert_eq!(link_position(&doc, 1, Some(99)), Some(13));
    }

    #[test]
    fn test_run_follows_link() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.rs"), "x\ny\n").unwrap();
        let note = dir.path().join("notes.txt");
        fs::write(&note, "#[a.rs:L2]\n").unwrap();

        run(&note, 1, None).unwrap();
        let err = run(&note, 3, None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_run_missing_target() {
        let dir = TempDir::new().unwrap();
        let note = dir.path().join("notes.txt");
        fs::write(&note, "#[gone.rs:L2]\n").unwrap();

        let err = run(&note, 1, None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
