//! Paste location command module

use std::io::{self, Write};
use std::path::Path;

use emx_link::util::display_path;
use emx_link::{Config, Document, FileStore, LinkEngine};

pub fn run(
    config: &Config,
    note: &Path,
    line: Option<usize>,
    yes: bool,
    no_root: bool,
) -> io::Result<()> {
    let mut doc = if note.exists() {
        Document::open(note)?
    } else {
        Document::with_path(note, "")
    };

    let point = paste_point(&mut doc, line)?;

    let note_display = display_path(note);
    let mut prompt = |root: &str| {
        preset_answer(yes, no_root).unwrap_or_else(|| {
            ask(&format!("Add root declaration {} to {}?", root, note_display)).unwrap_or(false)
        })
    };

    let store = FileStore::new(config.store_path());
    let mut engine = LinkEngine::new(store, config.root_detector());
    let outcome = engine.paste(&mut doc, point, &mut prompt)?;

    // Create parent directories if needed
    if let Some(parent) = note.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    doc.save()?;

    print!("{}", outcome.inserted);
    if let Some(root) = outcome.installed_root {
        eprintln!("Added root declaration: {}", root);
    }

    Ok(())
}

/// Offset the link goes to: the start of `line`, or the end of the note.
///
/// A point at the end of a note lacking a final newline gets one first, so
/// the link lands on its own line.
fn paste_point(doc: &mut Document, line: Option<usize>) -> io::Result<usize> {
    let point = match line {
        Some(line) => doc.offset_of_line(line),
        None => doc.len(),
    };

    if point == doc.len() && !doc.is_empty() && !doc.text().ends_with('\n') {
        doc.insert(point, "\n")?;
        return Ok(doc.len());
    }
    Ok(point)
}

/// Answer given on the command line, if any; `None` means ask
fn preset_answer(yes: bool, no_root: bool) -> Option<bool> {
    if yes {
        Some(true)
    } else if no_root {
        Some(false)
    } else {
        None
    }
}

fn ask(question: &str) -> io::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}
