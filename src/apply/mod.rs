//! Pure text application of resolved edits.
//!
//! No I/O at this layer: given original text and a resolved span or
//! insertion point, produce the complete new text. Splicing goes through a
//! rope so replacements are byte-exact; bounds and character boundaries are
//! checked up front and surface as internal errors, never as panics.

use crate::adjust::ResolvedSpan;
use crate::edit::InsertPosition;
use crate::error::{EditError, Result};
use ropey::Rope;

/// Detect the dominant line-ending sequence of a source text.
///
/// Majority wins; a tie or an empty file yields `\n`. The result is only
/// used for newlines the applier itself introduces; endings already present
/// in unaffected text are never rewritten.
pub fn detect_line_ending(source: &str) -> &'static str {
    let crlf = source.matches("\r\n").count();
    let lf = source.matches('\n').count() - crlf;
    if crlf > lf {
        "\r\n"
    } else {
        "\n"
    }
}

/// Replace the span with new content.
pub fn replace(source: &str, span: &ResolvedSpan, content: &str) -> Result<String> {
    splice(source, span.start, span.end, content)
}

/// Remove the span.
pub fn delete(source: &str, span: &ResolvedSpan) -> Result<String> {
    splice(source, span.start, span.end, "")
}

/// Insert content at a collapsed point, adding a separating newline only
/// when the boundary needs one.
///
/// Before: the separator follows the content unless the content already ends
/// with a newline. After: the separator precedes the content unless the
/// point already sits just past a newline (or at the start of the file).
pub fn insert(
    source: &str,
    point: usize,
    position: InsertPosition,
    content: &str,
) -> Result<String> {
    let eol = detect_line_ending(source);
    let text = match position {
        InsertPosition::Before => {
            if content.ends_with('\n') {
                content.to_string()
            } else {
                format!("{}{}", content, eol)
            }
        }
        InsertPosition::After => {
            let at_line_start = point == 0 || source.as_bytes().get(point - 1) == Some(&b'\n');
            if at_line_start {
                content.to_string()
            } else {
                format!("{}{}", eol, content)
            }
        }
    };
    splice(source, point, point, &text)
}

/// Byte-exact splice of `content` over `[start, end)`.
fn splice(source: &str, start: usize, end: usize, content: &str) -> Result<String> {
    check_span(source, start, end)?;

    let mut rope = Rope::from_str(source);
    let start_char = rope.byte_to_char(start);
    let end_char = rope.byte_to_char(end);
    rope.remove(start_char..end_char);
    rope.insert(start_char, content);
    Ok(rope.to_string())
}

/// Validate span bounds and character boundaries.
fn check_span(source: &str, start: usize, end: usize) -> Result<()> {
    if start > end
        || end > source.len()
        || !source.is_char_boundary(start)
        || !source.is_char_boundary(end)
    {
        return Err(EditError::InvalidSpan {
            start,
            end,
            len: source.len(),
        });
    }
    Ok(())
}
