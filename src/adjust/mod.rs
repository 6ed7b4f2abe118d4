//! Edit-span geometry.
//!
//! Turns a resolved symbol into the exact byte span an edit consumes.
//! Everything outside the returned span is copied through unchanged by the
//! applier; the adjuster never reorders text.

use crate::edit::InsertPosition;
use crate::symbol::Symbol;

/// A half-open `[start, end)` byte range into the original text.
///
/// Insertion points are represented as collapsed spans (`start == end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSpan {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

/// Span for a replace: exactly the declaration's own range.
///
/// Leading doc comments sit outside the range (an extraction-time decision),
/// so replacing a symbol leaves its documentation in place.
pub fn replace_span(symbol: &Symbol) -> ResolvedSpan {
    ResolvedSpan {
        start: symbol.byte_start,
        end: symbol.byte_end,
    }
}

/// Span for a delete: the declaration plus its attached doc block, its own
/// line padding, and any following blank lines.
///
/// The start retracts over the line's leading horizontal whitespace, then
/// over one preceding newline, but only when that newline closes a blank
/// line (the declaration's own padding), never the terminator of a content
/// line. The end advances through trailing whitespace up to the last newline
/// consumed, so indentation belonging to the next declaration is left alone;
/// pure trailing whitespace at end-of-file is consumed entirely.
pub fn delete_span(source: &str, symbol: &Symbol) -> ResolvedSpan {
    let bytes = source.as_bytes();

    let mut start = symbol.doc_start.unwrap_or(symbol.byte_start);
    while start > 0 && matches!(bytes[start - 1], b' ' | b'\t') {
        start -= 1;
    }
    if start > 0 && bytes[start - 1] == b'\n' {
        let mut before = start - 1;
        if before > 0 && bytes[before - 1] == b'\r' {
            before -= 1;
        }
        if before == 0 || bytes[before - 1] == b'\n' {
            start = before;
        }
    }

    let mut end = symbol.byte_end;
    let mut scan = end;
    while scan < bytes.len() && matches!(bytes[scan], b' ' | b'\t' | b'\r' | b'\n') {
        scan += 1;
        if bytes[scan - 1] == b'\n' {
            end = scan;
        }
    }
    if scan == bytes.len() {
        end = scan;
    }

    ResolvedSpan { start, end }
}

/// Collapsed insertion point relative to an anchor symbol.
///
/// `before` lands on the anchor's doc block when one is attached, so new
/// code never splits documentation from its declaration; `after` lands just
/// past the declaration. No original characters are consumed.
pub fn insertion_point(symbol: &Symbol, position: InsertPosition) -> ResolvedSpan {
    let point = match position {
        InsertPosition::Before => symbol.doc_start.unwrap_or(symbol.byte_start),
        InsertPosition::After => symbol.byte_end,
    };
    ResolvedSpan {
        start: point,
        end: point,
    }
}
