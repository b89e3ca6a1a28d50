//! List links command module

use std::io;
use std::ops::Range;
use std::path::Path;

use emx_link::grammar::{self, LinkKind};
use emx_link::util::display_path;
use emx_link::{navigate, Config, Document};

pub fn run(config: &Config, note: &Path) -> io::Result<()> {
    let mut doc = Document::open(note)?;

    if !emx_link::auto_activate(&mut doc, &config.auto_activate, &config.face) {
        eprintln!("No links in {}", display_path(note));
        return Ok(());
    }

    let Some(decorator) = doc.decorator() else {
        return Ok(());
    };

    for decoration in decorator.iter() {
        println!("{}", describe(&doc, note, decoration.span.clone()));
    }

    Ok(())
}

/// One listing line for the decorated link at `span`
fn describe(doc: &Document, note: &Path, span: Range<usize>) -> String {
    let text = &doc.text()[span.clone()];
    let line = doc.line_number_at(span.start);
    let prefix = format!("{}:{}: {}", display_path(note), line, text);

    // Decorations cover every #[...] run; typed parsing decides the kind
    match grammar::scan_links(text).first().map(|span| span.kind) {
        Some(LinkKind::Location) => match grammar::parse_location_link(text, 0) {
            Some(mut location) => {
                location.root = grammar::parse_metalink_root(doc.text());
                let target = navigate::target_path(doc, &location);
                let status = if target.exists() { "OK" } else { "MISSING" };
                format!(
                    "{} -> {}:{} [{}]",
                    prefix,
                    display_path(&target),
                    location.line,
                    status
                )
            }
            None => format!("{} (unrecognized)", prefix),
        },
        Some(LinkKind::Metalink) => format!("{} (root)", prefix),
        None => format!("{} (unrecognized)", prefix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn listing(doc: &mut Document, note: &Path) -> Vec<String> {
        doc.enable_decorations("link");
        let decorator = doc.decorator().unwrap();
        decorator
            .iter()
            .map(|d| describe(doc, note, d.span.clone()))
            .collect()
    }

    #[test]
    fn test_describe_classifies_links() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("here.rs"), "fn main() {}\n").unwrap();
        let note = dir.path().join("notes.txt");
        let root = emx_link::util::normalize_root(dir.path());
        let mut doc = Document::with_path(
            &note,
            format!("#[here.rs:L1]\n#[gone.rs:L2] #[todo]\n#[:meta:root:{}]\n", root),
        );

        let lines = listing(&mut doc, &note);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with(":1 [OK]"), "{}", lines[0]);
        assert!(lines[1].contains("gone.rs:2 [MISSING]"), "{}", lines[1]);
        assert!(lines[2].ends_with("#[todo] (unrecognized)"), "{}", lines[2]);
        assert!(lines[3].ends_with("(root)"), "{}", lines[3]);
    }

    #[test]
    fn test_describe_line_numbers() {
        let note = Path::new("notes.txt");
        let mut doc = Document::with_path(note, "intro\n\nsee #[a.rs:L9]\n");

        let lines = listing(&mut doc, note);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("notes.txt:3: #[a.rs:L9] -> "), "{}", lines[0]);
    }

    #[test]
    fn test_run_without_links() {
        let dir = TempDir::new().unwrap();
        let note = dir.path().join("notes.txt");
        fs::write(&note, "nothing here\n").unwrap();
        run(&Config::default(), &note).unwrap();
    }
}
