//! Deterministic symbol resolution.
//!
//! Resolution is a total function over (candidates, kind hint, qualifier
//! hint): hints narrow the candidate set but never turn a resolvable name
//! into a failure, and residual ambiguity falls back to the first match in
//! source order: logged, deterministic, and testable.

use crate::error::{EditError, Result};
use crate::symbol::{flatten, Symbol, SymbolKind};

/// Disambiguation hints accompanying a symbol lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolQuery<'a> {
    /// Expected symbol kind, when the caller knows it.
    pub kind: Option<SymbolKind>,
    /// Expected receiver/container name, when the caller knows it.
    pub qualifier: Option<&'a str>,
}

/// Resolve a name to a single symbol within a parsed tree.
///
/// Candidates are gathered from the flattened source-order view, so nested
/// symbols (fields, variants, methods) resolve the same way top-level ones
/// do.
///
/// # Errors
/// `SymbolNotFound` when no symbol carries the requested name.
pub fn resolve<'a>(symbols: &'a [Symbol], name: &str, query: SymbolQuery) -> Result<&'a Symbol> {
    let mut candidates: Vec<&Symbol> = flatten(symbols)
        .into_iter()
        .filter(|s| s.name == name)
        .collect();

    if candidates.is_empty() {
        return Err(EditError::SymbolNotFound(name.to_string()));
    }

    if let Some(kind) = query.kind {
        narrow(&mut candidates, |s| s.kind == kind);
    }
    if let Some(qualifier) = query.qualifier {
        narrow(&mut candidates, |s| s.qualifier.as_deref() == Some(qualifier));
    }

    if candidates.len() > 1 {
        log::warn!(
            "symbol '{}' is ambiguous ({} candidates); using the first in source order",
            name,
            candidates.len()
        );
    }
    Ok(candidates[0])
}

/// Keep only candidates matching the predicate, unless that would empty the
/// set. Hints express preference, not requirement.
fn narrow<'a>(candidates: &mut Vec<&'a Symbol>, keep: impl Fn(&Symbol) -> bool) {
    let narrowed: Vec<&'a Symbol> = candidates.iter().copied().filter(|s| keep(s)).collect();
    if !narrowed.is_empty() {
        *candidates = narrowed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(name: &str, kind: SymbolKind, qualifier: Option<&str>, byte_start: usize) -> Symbol {
        Symbol {
            name: name.to_string(),
            kind,
            qualifier: qualifier.map(|q| q.to_string()),
            byte_start,
            byte_end: byte_start + 1,
            line_start: 1,
            line_end: 1,
            col_start: 0,
            col_end: 1,
            doc_start: None,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_missing_symbol_message_is_stable() {
        let err = resolve(&[], "x", SymbolQuery::default()).unwrap_err();
        assert_eq!(err.to_string(), "Symbol 'x' not found in file");
    }

    #[test]
    fn test_unique_name_resolves_without_hints() {
        let symbols = vec![symbol("run", SymbolKind::Function, None, 0)];
        let found = resolve(&symbols, "run", SymbolQuery::default()).unwrap();
        assert_eq!(found.byte_start, 0);
    }

    #[test]
    fn test_kind_hint_narrows() {
        let symbols = vec![
            symbol("config", SymbolKind::Struct, None, 0),
            symbol("config", SymbolKind::Function, None, 10),
        ];
        let query = SymbolQuery {
            kind: Some(SymbolKind::Function),
            qualifier: None,
        };
        assert_eq!(resolve(&symbols, "config", query).unwrap().byte_start, 10);
    }

    #[test]
    fn test_qualifier_hint_narrows() {
        let symbols = vec![
            symbol("run", SymbolKind::Method, Some("A"), 0),
            symbol("run", SymbolKind::Method, Some("B"), 10),
        ];
        let query = SymbolQuery {
            kind: None,
            qualifier: Some("B"),
        };
        assert_eq!(resolve(&symbols, "run", query).unwrap().byte_start, 10);
    }

    #[test]
    fn test_unmatched_hint_falls_back_to_all_candidates() {
        let symbols = vec![symbol("run", SymbolKind::Function, None, 0)];
        let query = SymbolQuery {
            kind: Some(SymbolKind::Method),
            qualifier: None,
        };
        // Preference, not requirement: the lone function still resolves.
        assert_eq!(resolve(&symbols, "run", query).unwrap().byte_start, 0);
    }

    #[test]
    fn test_residual_ambiguity_takes_first_in_source_order() {
        let symbols = vec![
            symbol("run", SymbolKind::Method, Some("A"), 5),
            symbol("run", SymbolKind::Method, Some("B"), 20),
        ];
        assert_eq!(
            resolve(&symbols, "run", SymbolQuery::default())
                .unwrap()
                .byte_start,
            5
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let symbols = vec![
            symbol("run", SymbolKind::Function, None, 0),
            symbol("run", SymbolKind::Method, Some("A"), 10),
        ];
        let first = resolve(&symbols, "run", SymbolQuery::default()).unwrap().byte_start;
        for _ in 0..10 {
            assert_eq!(
                resolve(&symbols, "run", SymbolQuery::default())
                    .unwrap()
                    .byte_start,
                first
            );
        }
    }
}
