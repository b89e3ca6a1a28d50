//! LinkEngine - capture and paste of source locations
//!
//! Capture records the current line of a file-backed document into the
//! clipboard store. Paste writes the stored location into another document as
//! link text, offering to declare the project root there first so the link
//! can be written relative to it.

use crate::document::Document;
use crate::edit::check_offset;
use crate::error::{LinkError, Result};
use crate::grammar;
use crate::location::{Location, LocationStore};
use crate::resolve::{self, RootDetector};

/// Asks whether a metalink for `root` should be added to the destination
/// document
pub trait MetalinkPrompt {
    fn confirm_install(&mut self, root: &str) -> bool;
}

impl<F> MetalinkPrompt for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm_install(&mut self, root: &str) -> bool {
        self(root)
    }
}

/// What a paste changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteOutcome {
    /// Link text inserted at the paste position
    pub inserted: String,
    /// Root of the metalink appended to the document, if one was added
    pub installed_root: Option<String>,
}

/// Core engine for capture and paste
pub struct LinkEngine<S, D> {
    store: S,
    detector: D,
}

impl<S: LocationStore, D: RootDetector> LinkEngine<S, D> {
    pub fn new(store: S, detector: D) -> Self {
        Self { store, detector }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Capture the line containing `point`, replacing the stored location
    pub fn capture(&mut self, document: &Document, point: usize) -> Result<Location> {
        let path = document.path().ok_or(LinkError::NoBackingFile)?;

        let location = Location {
            file: path.to_string_lossy().into_owned(),
            line: document.line_number_at(point),
            root: self.detector.detect_root(path),
        };

        self.store.replace(location.clone())?;
        tracing::info!(
            file = %location.file,
            line = location.line,
            root = location.root.as_deref().unwrap_or("-"),
            "captured location"
        );
        Ok(location)
    }

    /// Insert the stored location as link text at `point`.
    ///
    /// When the location carries a root and `document` declares none, the
    /// prompt decides whether to append a metalink first.
    pub fn paste(
        &mut self,
        document: &mut Document,
        point: usize,
        prompt: &mut dyn MetalinkPrompt,
    ) -> Result<PasteOutcome> {
        let location = self.store.peek()?.ok_or(LinkError::EmptyClipboard)?;
        // Reject a bad point before the metalink can touch the document
        check_offset(document.text(), point)?;

        let mut metalink_root = grammar::parse_metalink_root(document.text());
        let mut installed_root = None;

        if let (Some(root), true) = (&location.root, metalink_root.is_none()) {
            if prompt.confirm_install(root) {
                resolve::install_metalink(document, root)?;
                metalink_root = Some(root.clone());
                installed_root = Some(root.clone());
            }
        }

        let inserted = grammar::serialize_location(&location, metalink_root.as_deref());
        document.insert(point, &inserted)?;

        tracing::info!(link = inserted.trim_end(), "pasted link");
        Ok(PasteOutcome {
            inserted,
            installed_root,
        })
    }
}
