//! Dedicated Rust extraction backend.
//!
//! Walks the tree-sitter-rust AST at declaration level: functions, structs
//! with their fields, enums with their variants, traits and impl blocks with
//! their members, modules, type aliases, consts and statics. Members carry
//! the enclosing type or module name as qualifier.
//!
//! Extraction-time range decisions: outer `#[...]` attributes are merged
//! into the symbol's range (tree-sitter-rust keeps them as siblings of the
//! item); leading doc comments stay outside the range and are recorded in
//! `doc_start`.

use super::{leading_doc_start, parse_source, symbol_from_node, SymbolExtractor};
use crate::error::Result;
use crate::symbol::{Symbol, SymbolKind};

/// Rust AST walker backend.
pub struct RustExtractor;

impl SymbolExtractor for RustExtractor {
    fn extract(&self, source: &str) -> Result<Vec<Symbol>> {
        let tree = parse_source(&tree_sitter_rust::language(), source, "Rust")?;
        let bytes = source.as_bytes();

        let mut symbols = Vec::new();
        let root = tree.root_node();
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            if let Some(symbol) = item_symbol(node, bytes, None, false) {
                symbols.push(symbol);
            }
        }
        Ok(symbols)
    }
}

/// Extract one declaration, including its nested members.
///
/// `in_type` distinguishes functions inside impl/trait blocks (methods)
/// from functions inside modules or at the top level.
fn item_symbol(
    node: tree_sitter::Node,
    source: &[u8],
    qualifier: Option<&str>,
    in_type: bool,
) -> Option<Symbol> {
    match node.kind() {
        "function_item" | "function_signature_item" => {
            let kind = if in_type {
                SymbolKind::Method
            } else {
                SymbolKind::Function
            };
            Some(finish(node, name_of(node, source)?, kind, qualifier))
        }

        "struct_item" => {
            let name = name_of(node, source)?;
            let mut symbol = finish(node, name.clone(), SymbolKind::Struct, qualifier);
            if let Some(body) = node.child_by_field_name("body") {
                symbol.children = members(body, source, &name, false);
            }
            Some(symbol)
        }

        "enum_item" => {
            let name = name_of(node, source)?;
            let mut symbol = finish(node, name.clone(), SymbolKind::Struct, qualifier);
            if let Some(body) = node.child_by_field_name("body") {
                symbol.children = members(body, source, &name, false);
            }
            Some(symbol)
        }

        "trait_item" => {
            let name = name_of(node, source)?;
            let mut symbol = finish(node, name.clone(), SymbolKind::Interface, qualifier);
            if let Some(body) = node.child_by_field_name("body") {
                symbol.children = members(body, source, &name, true);
            }
            Some(symbol)
        }

        "impl_item" => {
            let type_node = node.child_by_field_name("type")?;
            let type_text = type_node.utf8_text(source).ok()?;
            // `impl Foo<T>` resolves under the bare receiver name `Foo`.
            let receiver = type_text.split('<').next().unwrap_or(type_text).trim();
            let mut symbol = finish(node, receiver.to_string(), SymbolKind::Other, qualifier);
            if let Some(body) = node.child_by_field_name("body") {
                symbol.children = members(body, source, receiver, true);
            }
            Some(symbol)
        }

        "mod_item" => {
            let name = name_of(node, source)?;
            let mut symbol = finish(node, name.clone(), SymbolKind::Other, qualifier);
            if let Some(body) = node.child_by_field_name("body") {
                symbol.children = members(body, source, &name, false);
            }
            Some(symbol)
        }

        "type_item" => Some(finish(node, name_of(node, source)?, SymbolKind::Struct, qualifier)),
        "const_item" => Some(finish(
            node,
            name_of(node, source)?,
            SymbolKind::Constant,
            qualifier,
        )),
        "static_item" => Some(finish(
            node,
            name_of(node, source)?,
            SymbolKind::Variable,
            qualifier,
        )),

        "field_declaration" => Some(finish(
            node,
            name_of(node, source)?,
            SymbolKind::Field,
            qualifier,
        )),
        "enum_variant" => Some(finish(
            node,
            name_of(node, source)?,
            SymbolKind::Case,
            qualifier,
        )),

        _ => None,
    }
}

/// Extract the members of a body node (declaration list, field list,
/// variant list) with the container name as qualifier.
fn members(body: tree_sitter::Node, source: &[u8], container: &str, in_type: bool) -> Vec<Symbol> {
    let mut out = Vec::new();
    let mut cursor = body.walk();
    for child in body.named_children(&mut cursor) {
        if let Some(symbol) = item_symbol(child, source, Some(container), in_type) {
            out.push(symbol);
        }
    }
    out
}

fn name_of(node: tree_sitter::Node, source: &[u8]) -> Option<String> {
    node.child_by_field_name("name")
        .and_then(|n| n.utf8_text(source).ok().map(|s| s.to_string()))
}

/// Finalize a symbol: merge preceding outer attributes into the range and
/// attach the leading doc block.
fn finish(
    node: tree_sitter::Node,
    name: String,
    kind: SymbolKind,
    qualifier: Option<&str>,
) -> Symbol {
    let mut symbol = symbol_from_node(node, name, kind, qualifier);

    let mut anchor = node;
    while let Some(prev) = anchor.prev_sibling() {
        let adjacent = prev.end_position().row + 1 == anchor.start_position().row
            || prev.end_position().row == anchor.start_position().row;
        if prev.kind() == "attribute_item" && adjacent {
            anchor = prev;
        } else {
            break;
        }
    }
    if anchor.id() != node.id() {
        symbol.byte_start = anchor.start_byte();
        symbol.line_start = anchor.start_position().row + 1;
        symbol.col_start = anchor.start_position().column;
    }
    symbol.doc_start = leading_doc_start(anchor);
    symbol
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditError;

    fn extract(source: &str) -> Vec<Symbol> {
        RustExtractor.extract(source).expect("extraction failed")
    }

    #[test]
    fn test_extract_simple_function() {
        let symbols = extract("fn greet() {}\n");
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].name, "greet");
        assert_eq!(symbols[0].kind, SymbolKind::Function);
        assert_eq!(symbols[0].byte_start, 0);
        assert_eq!(symbols[0].byte_end, 13);
        assert_eq!(symbols[0].line_start, 1);
    }

    #[test]
    fn test_empty_source_is_not_an_error() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_syntax_error_fails_extraction() {
        let err = RustExtractor.extract("fn broken( {\n").unwrap_err();
        match err {
            EditError::Parse { message } => assert!(message.contains("syntax error")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_struct_fields_are_children() {
        let symbols = extract("struct Point {\n    x: u32,\n    y: u32,\n}\n");
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].kind, SymbolKind::Struct);
        let fields: Vec<&str> = symbols[0].children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(fields, vec!["x", "y"]);
        assert_eq!(symbols[0].children[0].kind, SymbolKind::Field);
        assert_eq!(symbols[0].children[0].qualifier.as_deref(), Some("Point"));
    }

    #[test]
    fn test_enum_variants_are_cases() {
        let symbols = extract("enum Color {\n    Red,\n    Green,\n}\n");
        assert_eq!(symbols[0].kind, SymbolKind::Struct);
        assert_eq!(symbols[0].children.len(), 2);
        assert_eq!(symbols[0].children[0].kind, SymbolKind::Case);
        assert_eq!(symbols[0].children[0].name, "Red");
        assert_eq!(symbols[0].children[0].qualifier.as_deref(), Some("Color"));
    }

    #[test]
    fn test_impl_methods_carry_receiver_qualifier() {
        let source = "struct A;\nimpl A {\n    fn run(&self) {}\n}\n";
        let symbols = extract(source);
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[1].kind, SymbolKind::Other);
        assert_eq!(symbols[1].name, "A");
        let run = &symbols[1].children[0];
        assert_eq!(run.name, "run");
        assert_eq!(run.kind, SymbolKind::Method);
        assert_eq!(run.qualifier.as_deref(), Some("A"));
    }

    #[test]
    fn test_generic_impl_receiver_is_stripped() {
        let source = "struct W<T>(T);\nimpl<T> W<T> {\n    fn get(&self) {}\n}\n";
        let symbols = extract(source);
        let imp = symbols.iter().find(|s| s.kind == SymbolKind::Other).unwrap();
        assert_eq!(imp.name, "W");
        assert_eq!(imp.children[0].qualifier.as_deref(), Some("W"));
    }

    #[test]
    fn test_trait_is_interface_with_method_children() {
        let source = "trait Speak {\n    fn speak(&self);\n    fn volume(&self) -> u8 { 1 }\n}\n";
        let symbols = extract(source);
        assert_eq!(symbols[0].kind, SymbolKind::Interface);
        assert_eq!(symbols[0].children.len(), 2);
        assert!(symbols[0]
            .children
            .iter()
            .all(|c| c.kind == SymbolKind::Method && c.qualifier.as_deref() == Some("Speak")));
    }

    #[test]
    fn test_const_static_and_type_alias() {
        let source = "const MAX: u32 = 8;\nstatic NAME: &str = \"x\";\ntype Pair = (u32, u32);\n";
        let symbols = extract(source);
        assert_eq!(symbols[0].kind, SymbolKind::Constant);
        assert_eq!(symbols[1].kind, SymbolKind::Variable);
        assert_eq!(symbols[2].kind, SymbolKind::Struct);
    }

    #[test]
    fn test_module_members_are_nested() {
        let source = "mod inner {\n    fn helper() {}\n}\n";
        let symbols = extract(source);
        assert_eq!(symbols[0].name, "inner");
        assert_eq!(symbols[0].children[0].name, "helper");
        assert_eq!(symbols[0].children[0].kind, SymbolKind::Function);
        assert_eq!(symbols[0].children[0].qualifier.as_deref(), Some("inner"));
    }

    #[test]
    fn test_doc_comment_sets_doc_start_but_not_range() {
        let source = "/// Greets.\nfn greet() {}\n";
        let symbols = extract(source);
        assert_eq!(symbols[0].doc_start, Some(0));
        assert_eq!(symbols[0].byte_start, 12);
    }

    #[test]
    fn test_stacked_doc_comments_attach_as_one_block() {
        let source = "/// Line one.\n/// Line two.\nfn greet() {}\n";
        let symbols = extract(source);
        assert_eq!(symbols[0].doc_start, Some(0));
    }

    #[test]
    fn test_blank_line_breaks_doc_attachment() {
        let source = "// stray\n\nfn greet() {}\n";
        let symbols = extract(source);
        assert_eq!(symbols[0].doc_start, None);
    }

    #[test]
    fn test_trailing_comment_does_not_attach_to_next_item() {
        let source = "fn a() {} // note\nfn b() {}\n";
        let symbols = extract(source);
        assert_eq!(symbols[1].name, "b");
        assert_eq!(symbols[1].doc_start, None);
    }

    #[test]
    fn test_attributes_merge_into_range() {
        let source = "#[derive(Debug)]\nstruct Foo {\n    x: u32,\n}\n";
        let symbols = extract(source);
        assert_eq!(symbols[0].byte_start, 0);
        assert_eq!(symbols[0].line_start, 1);
    }

    #[test]
    fn test_doc_above_attribute_attaches() {
        let source = "/// Docs.\n#[derive(Debug)]\nstruct Foo;\n";
        let symbols = extract(source);
        assert_eq!(symbols[0].doc_start, Some(0));
        assert_eq!(symbols[0].byte_start, 10);
    }

    #[test]
    fn test_duplicate_names_are_all_retained() {
        let source = "struct item {\n    v: u32,\n}\nfn item() {}\n";
        let symbols = extract(source);
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[0].kind, SymbolKind::Struct);
        assert_eq!(symbols[1].kind, SymbolKind::Function);
    }
}
