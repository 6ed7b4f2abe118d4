//! Symbol extraction backends.
//!
//! One capability, two implementations: a dedicated Rust AST walker and a
//! table-driven walker covering Python, JavaScript, TypeScript, and Java.
//! The backend is selected once per request, by language; everything
//! downstream is backend-agnostic.

pub mod detect;
pub mod generic;
pub mod rust;

use crate::error::{EditError, Result};
use crate::symbol::{Symbol, SymbolKind};

pub use detect::{detect_language, Language};

/// Capability implemented by every extraction backend.
///
/// Input is the full file text; path resolution is an external concern.
/// Extraction never partially succeeds: a source with syntax errors yields
/// an error, an empty source yields an empty list.
pub trait SymbolExtractor {
    /// Parse `source` into an ordered tree of symbols.
    fn extract(&self, source: &str) -> Result<Vec<Symbol>>;
}

/// Select the extraction backend for a language.
pub fn extractor_for(language: Language) -> Box<dyn SymbolExtractor> {
    match language {
        Language::Rust => Box::new(rust::RustExtractor),
        other => Box::new(generic::GenericExtractor::new(other)),
    }
}

/// Parse source text and reject trees containing syntax errors.
///
/// Stateless per call: a fresh parser is built every time so concurrent
/// requests need no coordination.
pub(crate) fn parse_source(
    grammar: &tree_sitter::Language,
    source: &str,
    language_name: &str,
) -> Result<tree_sitter::Tree> {
    let mut parser = tree_sitter::Parser::new();
    parser.set_language(grammar).map_err(|e| EditError::Parse {
        message: format!("failed to set {} grammar: {:?}", language_name, e),
    })?;

    let tree = parser.parse(source, None).ok_or_else(|| EditError::Parse {
        message: "parse failed - no tree returned".to_string(),
    })?;

    if tree.root_node().has_error() {
        let (line, column) = first_error_position(tree.root_node());
        return Err(EditError::Parse {
            message: format!("syntax error at line {}, column {}", line, column),
        });
    }

    Ok(tree)
}

/// Locate the first error or missing node in a tree, as (1-based line,
/// 0-based column).
fn first_error_position(node: tree_sitter::Node) -> (usize, usize) {
    if node.is_error() || node.is_missing() {
        let point = node.start_position();
        return (point.row + 1, point.column);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            return first_error_position(child);
        }
    }

    let point = node.start_position();
    (point.row + 1, point.column)
}

/// Build a symbol from a tree-sitter node's span.
pub(crate) fn symbol_from_node(
    node: tree_sitter::Node,
    name: String,
    kind: SymbolKind,
    qualifier: Option<&str>,
) -> Symbol {
    let start = node.start_position();
    let end = node.end_position();
    Symbol {
        name,
        kind,
        qualifier: qualifier.map(|q| q.to_string()),
        byte_start: node.start_byte(),
        byte_end: node.end_byte(),
        line_start: start.row + 1,
        line_end: end.row + 1,
        col_start: start.column,
        col_end: end.column,
        doc_start: None,
        children: Vec::new(),
    }
}

fn is_comment_kind(kind: &str) -> bool {
    matches!(kind, "comment" | "line_comment" | "block_comment")
}

/// Start offset of the doc/comment block attached to a declaration.
///
/// Walks preceding sibling comments while they are contiguous: each comment
/// must end on the line directly above the node below it and sit on its own
/// line. A trailing comment of the previous statement never attaches, and a
/// blank line breaks the run.
pub(crate) fn leading_doc_start(node: tree_sitter::Node) -> Option<usize> {
    let mut doc_start = None;
    let mut cur = node;
    while let Some(prev) = cur.prev_sibling() {
        if !is_comment_kind(prev.kind()) {
            break;
        }
        if prev.end_position().row + 1 != cur.start_position().row {
            break;
        }
        if let Some(before) = prev.prev_sibling() {
            if !is_comment_kind(before.kind())
                && before.end_position().row == prev.start_position().row
            {
                break;
            }
        }
        doc_start = Some(prev.start_byte());
        cur = prev;
    }
    doc_start
}
