//! Link navigation
//!
//! Following a link runs through `Idle -> Resolving -> Found | NotFound`:
//! the link under the cursor is parsed, its root filled in from the
//! document's metalink, the path resolved and checked, and the target file
//! opened at the requested line.

use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::{LinkError, Result};
use crate::grammar;
use crate::location::Location;
use crate::resolve;

/// Where the navigator currently stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NavState {
    #[default]
    Idle,
    Resolving(Location),
    Found { path: PathBuf, line: usize },
    NotFound(PathBuf),
}

/// Result of a successful jump
#[derive(Debug, Clone)]
pub struct Jump {
    /// Resolved file path
    pub path: PathBuf,
    /// Requested 1-based line
    pub line: usize,
    /// Byte offset of the line start in `document`
    pub position: usize,
    /// The opened target
    pub document: Document,
}

/// Opens the file a link points at
pub trait FileOpener {
    fn open(&mut self, path: &Path) -> Result<Document>;
}

/// Reads targets from the file system
#[derive(Debug, Default, Clone, Copy)]
pub struct FsOpener;

impl FileOpener for FsOpener {
    fn open(&mut self, path: &Path) -> Result<Document> {
        Document::open(path)
    }
}

/// Runs after a successful jump (scrolling, highlighting, logging)
pub trait JumpHook {
    fn on_jump(&mut self, jump: &Jump);
}

impl<F> JumpHook for F
where
    F: FnMut(&Jump),
{
    fn on_jump(&mut self, jump: &Jump) {
        self(jump)
    }
}

pub struct Navigator<O = FsOpener> {
    opener: O,
    hooks: Vec<Box<dyn JumpHook>>,
    state: NavState,
}

impl Navigator<FsOpener> {
    pub fn new() -> Self {
        Self::with_opener(FsOpener)
    }
}

impl Default for Navigator<FsOpener> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: FileOpener> Navigator<O> {
    pub fn with_opener(opener: O) -> Self {
        Self {
            opener,
            hooks: Vec::new(),
            state: NavState::Idle,
        }
    }

    /// Register a hook run after every successful jump, in order of
    /// registration
    pub fn add_hook(&mut self, hook: impl JumpHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// Follow the location link at `position` in `document`.
    ///
    /// Returns `Ok(None)` when there is no link there. A target that does not
    /// exist is reported as [`LinkError::TargetMissing`].
    pub fn follow(&mut self, document: &Document, position: usize) -> Result<Option<Jump>> {
        self.state = NavState::Idle;

        let Some((_, mut location)) = document.location_link_at(position) else {
            return Ok(None);
        };

        if location.root.is_none() {
            location.root = grammar::parse_metalink_root(document.text());
        }
        self.state = NavState::Resolving(location.clone());

        let path = target_path(document, &location);
        if !path.exists() {
            tracing::info!(path = %path.display(), "link target missing");
            self.state = NavState::NotFound(path.clone());
            return Err(LinkError::TargetMissing { path });
        }

        let target = self.opener.open(&path)?;
        let position = target.offset_of_line(location.line);
        let jump = Jump {
            path: path.clone(),
            line: location.line,
            position,
            document: target,
        };

        tracing::info!(path = %path.display(), line = location.line, "followed link");
        self.state = NavState::Found {
            path,
            line: location.line,
        };
        for hook in &mut self.hooks {
            hook.on_jump(&jump);
        }

        Ok(Some(jump))
    }

    /// Follow a link from a pointer click.
    ///
    /// On a decorated document the click must land on a decorated span.
    /// A click lands on a character, so the offset right after a link is
    /// outside it.
    pub fn follow_click(&mut self, document: &Document, position: usize) -> Result<Option<Jump>> {
        let on_link = match document.decorator() {
            Some(decorator) => decorator.decoration_at(position).is_some(),
            None => document
                .location_link_at(position)
                .is_some_and(|(span, _)| position < span.end),
        };

        if !on_link {
            self.state = NavState::Idle;
            return Ok(None);
        }
        self.follow(document, position)
    }
}

/// Resolved path of `location`, with a still-relative result read against
/// the directory of the document holding the link
pub fn target_path(document: &Document, location: &Location) -> PathBuf {
    let path = resolve::resolve(location);
    if path.is_absolute() {
        return path;
    }

    match document.path().and_then(Path::parent) {
        Some(dir) => dir.join(path),
        None => path,
    }
}
