//! Language-agnostic symbol model.
//!
//! Every extraction backend produces the same `Symbol` shape so the rest of
//! the pipeline (resolve, adjust, apply) never branches on source language.
//! A parse produces a fresh tree; symbols are never mutated afterwards and
//! are discarded once the edit completes.

use serde::{Deserialize, Serialize};

/// Structural kind of a declaration, fixed at extraction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// Free function.
    Function,
    /// Function attached to a type, trait, interface, or class.
    Method,
    /// Type declaration: struct, class, enum, type alias.
    Struct,
    /// Interface or trait declaration.
    Interface,
    /// Field of a struct, class, or interface.
    Field,
    /// Variable declaration (`let`, `var`, `static`).
    Variable,
    /// Constant declaration.
    Constant,
    /// Enum variant or member.
    Case,
    /// Anything else with a name and a span (impl blocks, modules, namespaces).
    Other,
}

impl SymbolKind {
    /// Convert to string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Function => "function",
            SymbolKind::Method => "method",
            SymbolKind::Struct => "struct",
            SymbolKind::Interface => "interface",
            SymbolKind::Field => "field",
            SymbolKind::Variable => "variable",
            SymbolKind::Constant => "constant",
            SymbolKind::Case => "case",
            SymbolKind::Other => "other",
        }
    }
}

/// A named, structurally-delimited declaration in source text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    /// Local symbol name (e.g., `foo`).
    pub name: String,

    /// Symbol kind.
    pub kind: SymbolKind,

    /// Receiver or enclosing container name, when nested (e.g. the impl
    /// self-type for a method, the class for a field).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,

    /// Start byte offset of the declaration itself.
    pub byte_start: usize,

    /// End byte offset (exclusive).
    pub byte_end: usize,

    /// Start line (1-based).
    pub line_start: usize,

    /// End line (1-based).
    pub line_end: usize,

    /// Start column (0-based, in bytes).
    pub col_start: usize,

    /// End column (0-based, in bytes).
    pub col_end: usize,

    /// Start byte offset of the attached leading doc/comment block, when one
    /// sits directly above the declaration. Not part of the declaration
    /// range: replace keeps the docs in place, delete removes them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_start: Option<usize>,

    /// Nested symbols (fields, variants, methods) in source order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Symbol>,
}

/// Flatten a symbol tree into a source-order list.
///
/// Parents precede their children; every symbol, nested or not, appears
/// exactly once so each is independently resolvable by name.
pub fn flatten(symbols: &[Symbol]) -> Vec<&Symbol> {
    let mut flat = Vec::new();
    for symbol in symbols {
        push_flat(symbol, &mut flat);
    }
    flat
}

fn push_flat<'a>(symbol: &'a Symbol, flat: &mut Vec<&'a Symbol>) {
    flat.push(symbol);
    for child in &symbol.children {
        push_flat(child, flat);
    }
}
