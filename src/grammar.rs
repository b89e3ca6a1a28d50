//! Link grammar
//!
//! Two link forms share the `#[` ... `]` delimiters:
//!
//! - location link: `#[src/main.rs:L42]`
//! - metalink (root declaration): `#[:meta:root:/home/me/project/]`
//!
//! Brackets and line breaks never appear inside a link, so a link always sits
//! on a single physical line. Parsing is total: text that does not match is
//! simply not a link.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{LINE_MARKER, LINK_CLOSE, LINK_OPEN, METALINK_PREFIX, NEWLINE};
use crate::location::Location;
use crate::util;

/// Any `#[...]` run, regardless of kind
static ANY_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#\[[^\[\]\n]+\]").expect("link pattern is valid"));

static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#\[([^\[\]\n]+):L([0-9]+)\]").expect("location pattern is valid")
});

static METALINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#\[:meta:root:([^\[\]\n]+)\]").expect("metalink pattern is valid")
});

/// Kind of a recognized link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Location,
    Metalink,
}

/// A typed link found in text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpan {
    /// Byte range of the whole link, delimiters included
    pub range: Range<usize>,
    pub kind: LinkKind,
}

/// Whether `text` contains anything shaped like a link
pub fn has_link(text: &str) -> bool {
    ANY_LINK_RE.is_match(text)
}

/// Byte ranges of every `#[...]` run in `text`
pub fn link_ranges(text: &str) -> impl Iterator<Item = Range<usize>> + '_ {
    ANY_LINK_RE.find_iter(text).map(|m| m.range())
}

/// Location and metalink spans in document order.
///
/// `#[...]` runs matching neither form are skipped.
pub fn scan_links(text: &str) -> Vec<LinkSpan> {
    link_ranges(text)
        .filter_map(|range| {
            let slice = &text[range.clone()];
            let kind = if METALINK_RE.is_match(slice) {
                LinkKind::Metalink
            } else if location_from_captures(slice).is_some() {
                LinkKind::Location
            } else {
                return None;
            };
            Some(LinkSpan { range, kind })
        })
        .collect()
}

/// The location link on `line` whose span contains `offset`, with its span.
///
/// A cursor sitting right after the closing bracket still picks up the link,
/// unless another link starts at that very offset.
pub fn location_link_at(line: &str, offset: usize) -> Option<(Range<usize>, Location)> {
    let mut touching = None;

    for caps in LOCATION_RE.captures_iter(line) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > offset {
            break;
        }
        if offset > whole.end() {
            continue;
        }
        let Some(location) = caps
            .get(1)
            .zip(caps.get(2))
            .and_then(|(file, line)| location_from_parts(file.as_str(), line.as_str()))
        else {
            continue;
        };
        if offset < whole.end() {
            return Some((whole.range(), location));
        }
        touching = Some((whole.range(), location));
    }

    touching
}

/// Parse the location link under `offset` in a single line of text
pub fn parse_location_link(line: &str, offset: usize) -> Option<Location> {
    location_link_at(line, offset).map(|(_, location)| location)
}

/// Root declared by the first metalink in `document`.
///
/// Later metalinks are ignored.
pub fn parse_metalink_root(document: &str) -> Option<String> {
    let mut roots = METALINK_RE.captures_iter(document);
    let root = roots.next()?.get(1)?.as_str().to_string();

    if tracing::enabled!(tracing::Level::DEBUG) {
        let ignored = roots.count();
        if ignored > 0 {
            tracing::debug!(root = %root, ignored, "multiple metalinks, using the first");
        }
    }

    Some(root)
}

/// Serialize a location as link text terminated by a newline.
///
/// When `metalink_root` is given and the file is an absolute path underneath
/// it, the file is written relative to that root.
pub fn serialize_location(location: &Location, metalink_root: Option<&str>) -> String {
    let file = metalink_root
        .and_then(|root| util::relative_to_root(&location.file, root))
        .unwrap_or_else(|| location.file.clone());

    format!(
        "{}{}{}{}{}{}",
        LINK_OPEN, file, LINE_MARKER, location.line, LINK_CLOSE, NEWLINE
    )
}

/// Serialize a root declaration terminated by a newline
pub fn serialize_metalink(root: &str) -> String {
    format!("{}{}{}{}{}", LINK_OPEN, METALINK_PREFIX, root, LINK_CLOSE, NEWLINE)
}

fn location_from_captures(text: &str) -> Option<Location> {
    let caps = LOCATION_RE.captures(text)?;
    location_from_parts(caps.get(1)?.as_str(), caps.get(2)?.as_str())
}

fn location_from_parts(file: &str, line: &str) -> Option<Location> {
    // Line 0 and numbers too large for usize are not valid targets
    let line: usize = line.parse().ok().filter(|&n| n >= 1)?;
    Some(Location::new(file, line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location_link() {
        let line = "see #[src/main.rs:L42] for details";
        let loc = parse_location_link(line, 10).unwrap();
        assert_eq!(loc.file, "src/main.rs");
        assert_eq!(loc.line, 42);
        assert_eq!(loc.root, None);
    }

    #[test]
    fn test_parse_location_link_query_outside_span() {
        let line = "see #[src/main.rs:L42] for details";
        assert_eq!(parse_location_link(line, 0), None);
        assert_eq!(parse_location_link(line, 3), None);
        assert!(parse_location_link(line, 4).is_some());
        // Right after the closing bracket
        assert!(parse_location_link(line, 22).is_some());
        assert_eq!(parse_location_link(line, 23), None);
    }

    #[test]
    fn test_parse_location_link_picks_span_under_query() {
        let line = "#[a.rs:L1] #[b.rs:L2]";
        assert_eq!(parse_location_link(line, 2).unwrap().file, "a.rs");
        assert_eq!(parse_location_link(line, 14).unwrap().file, "b.rs");
    }

    #[test]
    fn test_adjacent_links_offset_belongs_to_second() {
        let line = "#[a.rs:L1]#[b.rs:L2]";
        assert_eq!(parse_location_link(line, 9).unwrap().file, "a.rs");
        assert_eq!(parse_location_link(line, 10).unwrap().file, "b.rs");
        assert_eq!(location_link_at(line, 10).unwrap().0, 10..20);
        assert_eq!(parse_location_link(line, 20).unwrap().file, "b.rs");
    }

    #[test]
    fn test_location_link_at_returns_span() {
        let line = "x #[a.rs:L7]";
        let (range, loc) = location_link_at(line, 5).unwrap();
        assert_eq!(range, 2..12);
        assert_eq!(loc.line, 7);
    }

    #[test]
    fn test_malformed_links_do_not_match() {
        assert_eq!(parse_location_link("#[src/main.rs:L42", 3), None);
        assert_eq!(parse_location_link("#[src/[x]/main.rs:L42]", 3), None);
        assert_eq!(parse_location_link("#[src/main.rs:Lx]", 3), None);
        assert_eq!(parse_location_link("#[src/main.rs:L0]", 3), None);
        assert_eq!(parse_location_link("#[:L3]", 2), None);
    }

    #[test]
    fn test_file_may_contain_colons() {
        let loc = parse_location_link("#[C:/work/a.rs:L3]", 1).unwrap();
        assert_eq!(loc.file, "C:/work/a.rs");
        assert_eq!(loc.line, 3);
    }

    #[test]
    fn test_parse_metalink_root_first_wins() {
        let doc = "notes\n#[:meta:root:/first/]\nmore\n#[:meta:root:/second/]\n";
        assert_eq!(parse_metalink_root(doc), Some("/first/".to_string()));
    }

    #[test]
    fn test_parse_metalink_root_absent() {
        assert_eq!(parse_metalink_root("#[a.rs:L1]\n"), None);
        assert_eq!(parse_metalink_root("#[:meta:root:]\n"), None);
    }

    #[test]
    fn test_metalink_does_not_span_lines() {
        assert_eq!(parse_metalink_root("#[:meta:root:/a\n/b/]"), None);
    }

    #[test]
    fn test_has_link() {
        assert!(has_link("text #[anything at all] text"));
        assert!(!has_link("text #[] text"));
        assert!(!has_link("plain [text] here"));
    }

    #[test]
    fn test_scan_links_kinds() {
        let doc = "#[a.rs:L1]\n#[note]\n#[:meta:root:/p/]\n";
        let spans = scan_links(doc);
        assert_eq!(
            spans,
            vec![
                LinkSpan { range: 0..10, kind: LinkKind::Location },
                LinkSpan { range: 19..36, kind: LinkKind::Metalink },
            ]
        );
    }

    #[test]
    fn test_serialize_without_root_round_trips() {
        for (file, line) in [("x.py", 1), ("src/lib.rs", 12), ("/abs/path/f.c", 9000)] {
            let text = serialize_location(&Location::new(file, line), None);
            assert_eq!(text, format!("#[{}:L{}]\n", file, line));
            let parsed = parse_location_link(&text, 0).unwrap();
            assert_eq!(parsed, Location::new(file, line));
        }
    }

    #[test]
    fn test_serialize_relative_to_metalink_root() {
        let loc = Location::new("/a/b/x.py", 12).with_root("/a/b/");
        assert_eq!(serialize_location(&loc, Some("/a/b/")), "#[x.py:L12]\n");
        assert_eq!(serialize_location(&loc, Some("/a/bc/")), "#[/a/b/x.py:L12]\n");
        assert_eq!(serialize_location(&loc, None), "#[/a/b/x.py:L12]\n");
    }

    #[test]
    fn test_serialize_relative_file_untouched() {
        let loc = Location::new("x.py", 3);
        assert_eq!(serialize_location(&loc, Some("/a/b/")), "#[x.py:L3]\n");
    }

    #[test]
    fn test_serialize_metalink() {
        assert_eq!(serialize_metalink("/a/b/"), "#[:meta:root:/a/b/]\n");
        assert_eq!(parse_metalink_root(&serialize_metalink("/a/b/")), Some("/a/b/".into()));
    }
}
