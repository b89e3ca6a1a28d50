//! EditOp module - text edits applied to a document buffer
//!
//! Every operation is validated before the content is touched, so a failed
//! edit leaves the text unchanged. A successful edit reports the affected
//! range so decorations can be shifted and the region rescanned.

use std::ops::Range;

use thiserror::Error;

/// Validation error for edit operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Offset past the end of the content
    #[error("offset {offset} is past the end of the text (length {len})")]
    OutOfBounds { offset: usize, len: usize },
    /// Offset splits a UTF-8 character
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
    /// Range end before its start
    #[error("invalid range {start}..{end}")]
    InvalidRange { start: usize, end: usize },
}

/// Edit operation type
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    /// Insert text at a byte offset
    Insert { offset: usize, text: String },
    /// Delete a byte range
    Delete { range: Range<usize> },
    /// Append text at the end, on its own line
    Append { text: String },
}

/// What an applied edit changed: `removed` bytes at `at` were replaced by
/// `inserted` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub at: usize,
    pub removed: usize,
    pub inserted: usize,
}

impl Applied {
    /// Range covered by the new text after the edit
    pub fn new_range(&self) -> Range<usize> {
        self.at..self.at + self.inserted
    }
}

impl EditOp {
    /// Create an insert operation
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        EditOp::Insert {
            offset,
            text: text.into(),
        }
    }

    /// Create a delete operation
    pub fn delete(range: Range<usize>) -> Self {
        EditOp::Delete { range }
    }

    /// Create an append operation
    pub fn append(text: impl Into<String>) -> Self {
        EditOp::Append { text: text.into() }
    }

    /// Apply this operation to `content` in place
    pub fn apply(&self, content: &mut String) -> Result<Applied, ValidationError> {
        match self {
            EditOp::Insert { offset, text } => {
                check_offset(content, *offset)?;
                content.insert_str(*offset, text);
                Ok(Applied {
                    at: *offset,
                    removed: 0,
                    inserted: text.len(),
                })
            }
            EditOp::Delete { range } => {
                if range.end < range.start {
                    return Err(ValidationError::InvalidRange {
                        start: range.start,
                        end: range.end,
                    });
                }
                check_offset(content, range.start)?;
                check_offset(content, range.end)?;
                content.replace_range(range.clone(), "");
                Ok(Applied {
                    at: range.start,
                    removed: range.len(),
                    inserted: 0,
                })
            }
            EditOp::Append { text } => {
                let at = content.len();
                let separator = if content.is_empty() || content.ends_with('\n') {
                    ""
                } else {
                    "\n"
                };
                content.push_str(separator);
                content.push_str(text);
                Ok(Applied {
                    at,
                    removed: 0,
                    inserted: separator.len() + text.len(),
                })
            }
        }
    }
}

/// Ensure `offset` is a valid insertion point in `content`
pub fn check_offset(content: &str, offset: usize) -> Result<(), ValidationError> {
    if offset > content.len() {
        return Err(ValidationError::OutOfBounds {
            offset,
            len: content.len(),
        });
    }
    if !content.is_char_boundary(offset) {
        return Err(ValidationError::NotCharBoundary { offset });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(content: &str, op: EditOp) -> Result<(String, Applied), ValidationError> {
        let mut text = content.to_string();
        let applied = op.apply(&mut text)?;
        Ok((text, applied))
    }

    #[test]
    fn test_insert_middle() {
        let (text, applied) = run("line 1\nline 2", EditOp::insert(7, "inserted\n")).unwrap();
        assert_eq!(text, "line 1\ninserted\nline 2");
        assert_eq!(applied, Applied { at: 7, removed: 0, inserted: 9 });
    }

    #[test]
    fn test_insert_past_end() {
        let err = run("abc", EditOp::insert(5, "x")).unwrap_err();
        assert_eq!(err, ValidationError::OutOfBounds { offset: 5, len: 3 });
    }

    #[test]
    fn test_insert_inside_multibyte_char() {
        let err = run("héllo", EditOp::insert(2, "x")).unwrap_err();
        assert_eq!(err, ValidationError::NotCharBoundary { offset: 2 });
    }

    #[test]
    fn test_delete_range() {
        let (text, applied) = run("line 1\nto delete\nline 3", EditOp::delete(7..17)).unwrap();
        assert_eq!(text, "line 1\nline 3");
        assert_eq!(applied.removed, 10);
        assert_eq!(applied.new_range(), 7..7);
    }

    #[test]
    fn test_delete_reversed_range() {
        #[allow(clippy::reversed_empty_ranges)]
        let err = run("abc", EditOp::delete(2..1)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRange { .. }));
    }

    #[test]
    fn test_append() {
        let (text, applied) = run("existing content", EditOp::append("appended")).unwrap();
        assert_eq!(text, "existing content\nappended");
        assert_eq!(applied, Applied { at: 16, removed: 0, inserted: 9 });
    }

    #[test]
    fn test_append_empty() {
        let (text, _) = run("", EditOp::append("first line")).unwrap();
        assert_eq!(text, "first line");
    }

    #[test]
    fn test_append_with_trailing_newline() {
        let (text, _) = run("existing\n", EditOp::append("appended")).unwrap();
        assert_eq!(text, "existing\nappended");
    }

    #[test]
    fn test_failed_edit_leaves_content() {
        let mut text = "original".to_string();
        assert!(EditOp::delete(3..20).apply(&mut text).is_err());
        assert_eq!(text, "original");
    }
}
