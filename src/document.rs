//! Text document the link operations work on
//!
//! A `Document` is the host-side buffer: its text, the file backing it (if
//! any), and optionally the decorations for the links it contains. Every edit
//! goes through [`Document::apply`] so decorations follow the text.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::decorate::Decorator;
use crate::edit::{Applied, EditOp};
use crate::error::Result;
use crate::grammar;
use crate::location::Location;

#[derive(Debug, Clone, Default)]
pub struct Document {
    path: Option<PathBuf>,
    text: String,
    decorator: Option<Decorator>,
}

impl Document {
    /// Document with no backing file
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            path: None,
            text: text.into(),
            decorator: None,
        }
    }

    /// Document backed by `path`, with the given text
    pub fn with_path(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            text: text.into(),
            decorator: None,
        }
    }

    /// Read `path` into a new document
    pub fn open(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::with_path(path, text))
    }

    /// Write the text back to the backing file; no-op without one
    pub fn save(&self) -> Result<()> {
        if let Some(path) = &self.path {
            fs::write(path, &self.text)?;
        }
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Document category used by auto-activation: the lower-cased file
    /// extension
    pub fn category(&self) -> Option<String> {
        self.path
            .as_deref()?
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    // === Lines ===

    /// 1-based number of the line containing `offset`
    pub fn line_number_at(&self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        self.text.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count() + 1
    }

    /// Range of the physical line containing `offset`, terminator excluded
    pub fn line_bounds(&self, offset: usize) -> Range<usize> {
        line_bounds(&self.text, offset)
    }

    /// Offset where 1-based `line` starts; lines past the end map to the end
    /// of the text
    pub fn offset_of_line(&self, line: usize) -> usize {
        if line <= 1 {
            return 0;
        }
        self.text
            .match_indices('\n')
            .nth(line - 2)
            .map(|(idx, _)| idx + 1)
            .unwrap_or(self.text.len())
    }

    /// The location link under `offset`, with its span in document
    /// coordinates
    pub fn location_link_at(&self, offset: usize) -> Option<(Range<usize>, Location)> {
        let line = self.line_bounds(offset);
        let offset = offset.min(self.text.len());
        let (span, location) = grammar::location_link_at(&self.text[line.clone()], offset - line.start)?;
        Some((span.start + line.start..span.end + line.start, location))
    }

    // === Edits ===

    /// Apply an edit, keeping decorations consistent with the new text
    pub fn apply(&mut self, op: EditOp) -> Result<Applied> {
        let applied = op.apply(&mut self.text)?;

        if let Some(decorator) = self.decorator.as_mut() {
            decorator.adjust_for_edit(applied.at, applied.removed, applied.inserted);
            let changed = applied.new_range();
            decorator.on_region_changed(&self.text, changed.start, changed.end);
        }

        Ok(applied)
    }

    pub fn insert(&mut self, offset: usize, text: &str) -> Result<Applied> {
        self.apply(EditOp::insert(offset, text))
    }

    pub fn delete(&mut self, range: Range<usize>) -> Result<Applied> {
        self.apply(EditOp::delete(range))
    }

    pub fn append(&mut self, text: &str) -> Result<Applied> {
        self.apply(EditOp::append(text))
    }

    // === Decorations ===

    /// Start decorating links, scanning the whole text once
    pub fn enable_decorations(&mut self, face: impl Into<String>) {
        let mut decorator = Decorator::new(face);
        decorator.decorate_all(&self.text);
        self.decorator = Some(decorator);
    }

    pub fn disable_decorations(&mut self) {
        self.decorator = None;
    }

    pub fn decorator(&self) -> Option<&Decorator> {
        self.decorator.as_ref()
    }
}

/// Range of the physical line of `text` containing `offset` (clamped to the
/// text), line terminator excluded
pub(crate) fn line_bounds(text: &str, offset: usize) -> Range<usize> {
    let bytes = text.as_bytes();
    let offset = offset.min(bytes.len());
    let start = bytes[..offset]
        .iter()
        .rposition(|&b| b == b'\n')
        .map(|idx| idx + 1)
        .unwrap_or(0);
    let end = bytes[offset..]
        .iter()
        .position(|&b| b == b'\n')
        .map(|idx| offset + idx)
        .unwrap_or(bytes.len());
    start..end
}
