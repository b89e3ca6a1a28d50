//! Incremental link decoration
//!
//! A [`Decorator`] keeps the set of highlighted link spans for one document.
//! After an edit the host reports the changed range; only the physical lines
//! touching that range are rescanned, so the cost of an update follows the
//! size of the edit rather than the size of the document.
//!
//! Decorations carry no parsed data. Following a link always re-reads the
//! text through the grammar.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::document::line_bounds;
use crate::grammar;

/// One highlighted, activatable link span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub span: Range<usize>,
    pub face: String,
}

impl Decoration {
    pub fn contains(&self, offset: usize) -> bool {
        self.span.contains(&offset)
    }
}

/// Decorations of a single document, keyed by span start. Spans never
/// overlap.
#[derive(Debug, Clone)]
pub struct Decorator {
    face: String,
    spans: BTreeMap<usize, Decoration>,
}

impl Decorator {
    pub fn new(face: impl Into<String>) -> Self {
        Self {
            face: face.into(),
            spans: BTreeMap::new(),
        }
    }

    pub fn face(&self) -> &str {
        &self.face
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Decorations in document order
    pub fn iter(&self) -> impl Iterator<Item = &Decoration> {
        self.spans.values()
    }

    /// The decoration covering `offset`
    pub fn decoration_at(&self, offset: usize) -> Option<&Decoration> {
        self.spans
            .range(..=offset)
            .next_back()
            .map(|(_, decoration)| decoration)
            .filter(|decoration| decoration.contains(offset))
    }

    pub fn clear(&mut self) {
        self.spans.clear();
    }

    /// Rebuild every decoration from scratch
    pub fn decorate_all(&mut self, text: &str) {
        self.clear();
        self.on_region_changed(text, 0, text.len());
    }

    /// Re-decorate after `text[changed_start..changed_end]` changed.
    ///
    /// The region is widened to whole physical lines: an edit boundary can
    /// fall inside a link, and the link must still be found in full.
    pub fn on_region_changed(&mut self, text: &str, changed_start: usize, changed_end: usize) {
        let (lo, hi) = if changed_start <= changed_end {
            (changed_start, changed_end)
        } else {
            (changed_end, changed_start)
        };
        let start = line_bounds(text, lo).start;
        let end = line_bounds(text, hi).end;

        let removed = self.unfontify(start, end);

        let mut added = 0;
        for range in grammar::link_ranges(&text[start..end]) {
            let span = start + range.start..start + range.end;
            self.spans.insert(
                span.start,
                Decoration {
                    span,
                    face: self.face.clone(),
                },
            );
            added += 1;
        }

        tracing::trace!(start, end, removed, added, "re-decorated region");
    }

    /// Shift decorations for an edit that replaced `removed` bytes at `at`
    /// with `inserted` bytes.
    ///
    /// Positions inside the removed text collapse onto `at`. Text inserted at
    /// a span's start becomes part of the span; text inserted at its end does
    /// not. A span left empty evaporates.
    pub fn adjust_for_edit(&mut self, at: usize, removed: usize, inserted: usize) {
        if removed == 0 && inserted == 0 {
            return;
        }

        let map = |pos: usize| {
            if pos <= at {
                pos
            } else if pos < at + removed {
                at
            } else {
                pos - removed + inserted
            }
        };

        // The span straddling `at`, if any, moves along with everything after it
        let split = self
            .spans
            .range(..at)
            .next_back()
            .filter(|(_, decoration)| decoration.span.end > at)
            .map(|(&start, _)| start)
            .unwrap_or(at);

        let tail = self.spans.split_off(&split);
        for (_, mut decoration) in tail {
            let start = map(decoration.span.start);
            let end = map(decoration.span.end);
            if start < end {
                decoration.span = start..end;
                self.spans.insert(start, decoration);
            } else {
                tracing::trace!(at, "decoration evaporated");
            }
        }
    }

    /// Drop every decoration intersecting `start..end`; returns how many
    fn unfontify(&mut self, start: usize, end: usize) -> usize {
        let doomed: Vec<usize> = self
            .spans
            .range(..end.max(start + 1))
            .rev()
            .take_while(|(_, decoration)| decoration.span.end > start)
            .map(|(&key, _)| key)
            .collect();

        for key in &doomed {
            self.spans.remove(key);
        }
        doomed.len()
    }
}
