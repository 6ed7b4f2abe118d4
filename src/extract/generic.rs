//! Table-driven extraction backend for Python, JavaScript, TypeScript, and
//! Java.
//!
//! One walker, parameterized by language: a classification table maps
//! tree-sitter node kinds to symbol kinds and name strategies, containers
//! (classes, interfaces, enums, namespaces) collect their members as
//! children with the container name as qualifier. Walking is
//! declaration-level only; function bodies are not descended into.

use super::{leading_doc_start, parse_source, symbol_from_node, Language, SymbolExtractor};
use crate::error::Result;
use crate::symbol::{Symbol, SymbolKind};

/// Multi-language walker backend.
pub struct GenericExtractor {
    language: Language,
}

impl GenericExtractor {
    /// Create a backend for the given language.
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

impl SymbolExtractor for GenericExtractor {
    fn extract(&self, source: &str) -> Result<Vec<Symbol>> {
        let grammar = grammar_for(self.language);
        let tree = parse_source(&grammar, source, self.language.as_str())?;
        let bytes = source.as_bytes();

        let mut symbols = Vec::new();
        let root = tree.root_node();
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            visit(node, bytes, self.language, None, false, &mut symbols);
        }
        Ok(symbols)
    }
}

fn grammar_for(language: Language) -> tree_sitter::Language {
    match language {
        Language::Rust => tree_sitter_rust::language(),
        Language::Python => tree_sitter_python::language(),
        Language::JavaScript => tree_sitter_javascript::language(),
        Language::TypeScript => tree_sitter_typescript::language_typescript(),
        Language::Java => tree_sitter_java::language(),
    }
}

/// How a node kind participates in extraction.
enum NodeClass {
    /// A leaf declaration of the given kind.
    Decl(SymbolKind),
    /// A declaration whose `body` field holds member declarations.
    Container(SymbolKind),
    /// A declaration whose name lives on a nested `variable_declarator`.
    Declarator(SymbolKind),
    /// A wrapper to look through (`export_statement`).
    Transparent,
    /// Python `decorated_definition`: the inner definition with the outer
    /// node's range, so decorators travel with the symbol.
    Decorated,
}

fn classify(language: Language, node_kind: &str) -> Option<NodeClass> {
    match language {
        Language::Python => match node_kind {
            "function_definition" => Some(NodeClass::Decl(SymbolKind::Function)),
            "class_definition" => Some(NodeClass::Container(SymbolKind::Struct)),
            "decorated_definition" => Some(NodeClass::Decorated),
            _ => None,
        },

        Language::JavaScript => classify_js(node_kind),

        Language::TypeScript => match node_kind {
            "interface_declaration" => Some(NodeClass::Container(SymbolKind::Interface)),
            "type_alias_declaration" => Some(NodeClass::Decl(SymbolKind::Struct)),
            "enum_declaration" => Some(NodeClass::Container(SymbolKind::Struct)),
            "internal_module" => Some(NodeClass::Container(SymbolKind::Other)),
            "abstract_class_declaration" => Some(NodeClass::Container(SymbolKind::Struct)),
            "public_field_definition" => Some(NodeClass::Decl(SymbolKind::Field)),
            "property_signature" => Some(NodeClass::Decl(SymbolKind::Field)),
            "method_signature" | "abstract_method_signature" => {
                Some(NodeClass::Decl(SymbolKind::Method))
            }
            "enum_assignment" => Some(NodeClass::Decl(SymbolKind::Case)),
            // Namespaces parse as expression statements; look through them.
            "expression_statement" => Some(NodeClass::Transparent),
            other => classify_js(other),
        },

        Language::Java => match node_kind {
            "class_declaration" => Some(NodeClass::Container(SymbolKind::Struct)),
            "interface_declaration" => Some(NodeClass::Container(SymbolKind::Interface)),
            "enum_declaration" => Some(NodeClass::Container(SymbolKind::Struct)),
            "method_declaration" | "constructor_declaration" => {
                Some(NodeClass::Decl(SymbolKind::Method))
            }
            "field_declaration" => Some(NodeClass::Declarator(SymbolKind::Field)),
            "enum_constant" => Some(NodeClass::Decl(SymbolKind::Case)),
            _ => None,
        },

        // The Rust backend is the dedicated walker; nothing to classify here.
        Language::Rust => None,
    }
}

fn classify_js(node_kind: &str) -> Option<NodeClass> {
    match node_kind {
        "function_declaration" | "generator_function_declaration" => {
            Some(NodeClass::Decl(SymbolKind::Function))
        }
        "class_declaration" => Some(NodeClass::Container(SymbolKind::Struct)),
        "method_definition" => Some(NodeClass::Decl(SymbolKind::Method)),
        "field_definition" => Some(NodeClass::Decl(SymbolKind::Field)),
        "lexical_declaration" | "variable_declaration" => {
            Some(NodeClass::Declarator(SymbolKind::Variable))
        }
        "export_statement" => Some(NodeClass::Transparent),
        _ => None,
    }
}

fn visit(
    node: tree_sitter::Node,
    source: &[u8],
    language: Language,
    qualifier: Option<&str>,
    in_class: bool,
    out: &mut Vec<Symbol>,
) {
    let Some(class) = classify(language, node.kind()) else {
        return;
    };
    match class {
        NodeClass::Transparent => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                visit(child, source, language, qualifier, in_class, out);
            }
        }
        NodeClass::Decorated => {
            if let Some(inner) = node.child_by_field_name("definition") {
                if let Some(inner_class) = classify(language, inner.kind()) {
                    emit(node, inner, inner_class, source, language, qualifier, in_class, out);
                }
            }
        }
        other => emit(node, node, other, source, language, qualifier, in_class, out),
    }
}

/// Emit a symbol for a classified declaration.
///
/// `range_node` supplies the span (it differs from `decl_node` only for
/// decorated definitions); `in_class` promotes plain functions to methods.
#[allow(clippy::too_many_arguments)]
fn emit(
    range_node: tree_sitter::Node,
    decl_node: tree_sitter::Node,
    class: NodeClass,
    source: &[u8],
    language: Language,
    qualifier: Option<&str>,
    in_class: bool,
    out: &mut Vec<Symbol>,
) {
    match class {
        NodeClass::Decl(kind) => {
            let Some(name) = node_name(decl_node, source) else {
                return;
            };
            let kind = if kind == SymbolKind::Function && in_class {
                SymbolKind::Method
            } else {
                kind
            };
            let mut symbol = symbol_from_node(range_node, name, kind, qualifier);
            symbol.doc_start = leading_doc_start(range_node);
            out.push(symbol);
        }

        NodeClass::Container(kind) => {
            let Some(name) = node_name(decl_node, source) else {
                return;
            };
            let mut symbol = symbol_from_node(range_node, name.clone(), kind, qualifier);
            symbol.doc_start = leading_doc_start(range_node);
            let members_are_class =
                matches!(kind, SymbolKind::Struct | SymbolKind::Interface);
            if let Some(body) = decl_node.child_by_field_name("body") {
                let mut children = Vec::new();
                let mut cursor = body.walk();
                for member in body.named_children(&mut cursor) {
                    // Bare TypeScript enum members are plain identifiers.
                    if member.kind() == "property_identifier" {
                        if let Ok(text) = member.utf8_text(source) {
                            let mut case = symbol_from_node(
                                member,
                                text.to_string(),
                                SymbolKind::Case,
                                Some(&name),
                            );
                            case.doc_start = leading_doc_start(member);
                            children.push(case);
                        }
                        continue;
                    }
                    visit(
                        member,
                        source,
                        language,
                        Some(&name),
                        members_are_class,
                        &mut children,
                    );
                }
                symbol.children = children;
            }
            out.push(symbol);
        }

        NodeClass::Declarator(kind) => {
            let declarator = {
                let mut cursor = decl_node.walk();
                let x = decl_node
                    .named_children(&mut cursor)
                    .find(|c| c.kind() == "variable_declarator");
                x
            };
            let Some(declarator) = declarator else {
                return;
            };
            let Some(name) = node_name(declarator, source) else {
                return;
            };
            let kind = if kind == SymbolKind::Variable && is_const(decl_node) {
                SymbolKind::Constant
            } else {
                kind
            };
            let mut symbol = symbol_from_node(range_node, name, kind, qualifier);
            symbol.doc_start = leading_doc_start(range_node);
            out.push(symbol);
        }

        NodeClass::Transparent | NodeClass::Decorated => {}
    }
}

fn node_name(node: tree_sitter::Node, source: &[u8]) -> Option<String> {
    let name_node = node
        .child_by_field_name("name")
        .or_else(|| node.child_by_field_name("property"))?;
    name_node.utf8_text(source).ok().map(|s| s.to_string())
}

fn is_const(node: tree_sitter::Node) -> bool {
    node.child(0).map_or(false, |c| c.kind() == "const")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditError;

    fn extract(language: Language, source: &str) -> Vec<Symbol> {
        GenericExtractor::new(language)
            .extract(source)
            .expect("extraction failed")
    }

    #[test]
    fn test_python_function_and_class() {
        let source = "class Greeter:\n    def greet(self):\n        return 1\n\ndef main():\n    pass\n";
        let symbols = extract(Language::Python, source);
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[0].name, "Greeter");
        assert_eq!(symbols[0].kind, SymbolKind::Struct);
        let greet = &symbols[0].children[0];
        assert_eq!(greet.name, "greet");
        assert_eq!(greet.kind, SymbolKind::Method);
        assert_eq!(greet.qualifier.as_deref(), Some("Greeter"));
        assert_eq!(symbols[1].kind, SymbolKind::Function);
    }

    #[test]
    fn test_python_decorated_definition_takes_outer_range() {
        let source = "@wrap\ndef handler():\n    pass\n";
        let symbols = extract(Language::Python, source);
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].name, "handler");
        assert_eq!(symbols[0].byte_start, 0);
    }

    #[test]
    fn test_python_hash_comment_attaches() {
        let source = "# helper\ndef util():\n    pass\n";
        let symbols = extract(Language::Python, source);
        assert_eq!(symbols[0].doc_start, Some(0));
        assert_eq!(symbols[0].byte_start, 9);
    }

    #[test]
    fn test_python_syntax_error_fails() {
        let err = GenericExtractor::new(Language::Python)
            .extract("def broken(:\n")
            .unwrap_err();
        assert!(matches!(err, EditError::Parse { .. }));
    }

    #[test]
    fn test_typescript_interface_members() {
        let source = "interface User {\n  id: string;\n  load(): void;\n}\n";
        let symbols = extract(Language::TypeScript, source);
        assert_eq!(symbols[0].kind, SymbolKind::Interface);
        assert_eq!(symbols[0].children[0].kind, SymbolKind::Field);
        assert_eq!(symbols[0].children[0].name, "id");
        assert_eq!(symbols[0].children[1].kind, SymbolKind::Method);
        assert_eq!(symbols[0].children[1].qualifier.as_deref(), Some("User"));
    }

    #[test]
    fn test_typescript_enum_members_are_cases() {
        let source = "enum Color {\n  Red,\n  Green = 2,\n}\n";
        let symbols = extract(Language::TypeScript, source);
        assert_eq!(symbols[0].kind, SymbolKind::Struct);
        let cases: Vec<&str> = symbols[0].children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(cases, vec!["Red", "Green"]);
        assert!(symbols[0].children.iter().all(|c| c.kind == SymbolKind::Case));
    }

    #[test]
    fn test_typescript_const_and_let() {
        let source = "const limit = 10;\nlet count = 0;\n";
        let symbols = extract(Language::TypeScript, source);
        assert_eq!(symbols[0].name, "limit");
        assert_eq!(symbols[0].kind, SymbolKind::Constant);
        assert_eq!(symbols[1].name, "count");
        assert_eq!(symbols[1].kind, SymbolKind::Variable);
    }

    #[test]
    fn test_typescript_exported_declarations_are_visible() {
        let source = "export interface Shape { area(): number; }\nexport function make(): Shape { return null as any; }\n";
        let symbols = extract(Language::TypeScript, source);
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[0].kind, SymbolKind::Interface);
        assert_eq!(symbols[1].kind, SymbolKind::Function);
    }

    #[test]
    fn test_typescript_type_alias() {
        let source = "type UserId = string;\n";
        let symbols = extract(Language::TypeScript, source);
        assert_eq!(symbols[0].name, "UserId");
        assert_eq!(symbols[0].kind, SymbolKind::Struct);
    }

    #[test]
    fn test_javascript_class_members() {
        let source = "function go() {}\nclass Box {\n  size = 1;\n  open() {}\n}\n";
        let symbols = extract(Language::JavaScript, source);
        assert_eq!(symbols[0].kind, SymbolKind::Function);
        assert_eq!(symbols[1].name, "Box");
        let members: Vec<(&str, SymbolKind)> = symbols[1]
            .children
            .iter()
            .map(|c| (c.name.as_str(), c.kind))
            .collect();
        assert_eq!(
            members,
            vec![("size", SymbolKind::Field), ("open", SymbolKind::Method)]
        );
    }

    #[test]
    fn test_java_class_members() {
        let source = "class Point {\n    int x;\n    int getX() { return x; }\n}\n";
        let symbols = extract(Language::Java, source);
        assert_eq!(symbols[0].kind, SymbolKind::Struct);
        assert_eq!(symbols[0].children[0].name, "x");
        assert_eq!(symbols[0].children[0].kind, SymbolKind::Field);
        assert_eq!(symbols[0].children[1].name, "getX");
        assert_eq!(symbols[0].children[1].kind, SymbolKind::Method);
        assert_eq!(symbols[0].children[1].qualifier.as_deref(), Some("Point"));
    }

    #[test]
    fn test_java_interface_and_enum() {
        let source =
            "interface Shape {\n    int area();\n}\nenum Mode {\n    ON,\n    OFF\n}\n";
        let symbols = extract(Language::Java, source);
        assert_eq!(symbols[0].kind, SymbolKind::Interface);
        assert_eq!(symbols[0].children[0].kind, SymbolKind::Method);
        assert_eq!(symbols[1].kind, SymbolKind::Struct);
        assert_eq!(symbols[1].children.len(), 2);
        assert!(symbols[1].children.iter().all(|c| c.kind == SymbolKind::Case));
    }

    #[test]
    fn test_empty_source_is_not_an_error() {
        assert!(extract(Language::Python, "").is_empty());
        assert!(extract(Language::JavaScript, "").is_empty());
    }
}
