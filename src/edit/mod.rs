//! Edit orchestration.
//!
//! Drives one request through Validating → Parsing → Resolving → Adjusting
//! → Applying → Verifying, strictly in order, and is the single place where
//! internal typed errors become the stable `EditResult.error` strings the
//! caller sees. A request is a pure transform over its own input text; on
//! any failure no text is produced, so there is nothing to roll back.

use crate::adjust;
use crate::apply;
use crate::error::{EditError, Result};
use crate::extract::{extractor_for, Language};
use crate::resolve::{resolve, SymbolQuery};
use crate::symbol::SymbolKind;
use serde::{Deserialize, Serialize};

/// The kind of structural edit to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditKind {
    /// Replace the symbol's declaration with new content.
    Replace,
    /// Insert new content relative to an anchor symbol.
    Insert,
    /// Delete the symbol's declaration.
    Delete,
}

/// Where an insert lands relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Immediately before the anchor (and its doc block, when attached).
    Before,
    /// Immediately after the anchor.
    After,
}

/// Placement of an insert relative to an existing symbol.
///
/// `position` is carried as a raw string and validated by the orchestrator
/// so every transport reports the same stable error for a bad value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertAnchor {
    /// `"before"` or `"after"`.
    pub position: String,
    /// Name of the symbol the insert is positioned against. Must resolve.
    pub relative_to: String,
}

/// A single structural edit request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditRequest {
    /// Target symbol name. For insert this names the new symbol and is not
    /// required to exist; the anchor is what must resolve.
    pub symbol: String,
    /// Edit operation.
    pub operation: EditKind,
    /// New content; required for replace and insert.
    #[serde(default)]
    pub content: Option<String>,
    /// Insert placement; required for insert.
    #[serde(default)]
    pub anchor: Option<InsertAnchor>,
    /// Optional kind hint for resolver disambiguation.
    #[serde(default)]
    pub symbol_kind: Option<SymbolKind>,
    /// Optional receiver/container hint for resolver disambiguation.
    #[serde(default)]
    pub qualifier: Option<String>,
}

/// Outcome of an edit: the full new text, or an error. Never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditResult {
    /// Whether the edit succeeded.
    pub success: bool,
    /// Complete modified file text on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Stable error description on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EditResult {
    /// Successful result carrying the full new text.
    pub fn succeeded(content: String) -> Self {
        Self {
            success: true,
            content: Some(content),
            error: None,
        }
    }

    /// Failed result carrying the error description.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            content: None,
            error: Some(error.into()),
        }
    }
}

/// Pipeline stages, in execution order. Used for trace logging only.
#[derive(Debug, Clone, Copy)]
enum Stage {
    Validating,
    Parsing,
    Resolving,
    Adjusting,
    Applying,
    Verifying,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Stage::Validating => "validating",
            Stage::Parsing => "parsing",
            Stage::Resolving => "resolving",
            Stage::Adjusting => "adjusting",
            Stage::Applying => "applying",
            Stage::Verifying => "verifying",
        }
    }
}

fn enter(stage: Stage) {
    log::debug!("stage: {}", stage.as_str());
}

/// Validated view of a request, with the operation's required fields proven
/// present.
enum Op<'a> {
    Replace(&'a str),
    Insert {
        content: &'a str,
        position: InsertPosition,
        anchor: &'a str,
    },
    Delete,
}

/// Apply a structural edit to `source` and report the outcome.
///
/// This is the core entry point: a pure function from `(source, request)`
/// to a result, no file I/O, no shared state. Callers own persisting the
/// returned text and serializing concurrent edits to the same file.
pub fn edit(source: &str, language: Language, request: &EditRequest) -> EditResult {
    match run(source, language, request) {
        Ok(content) => EditResult::succeeded(content),
        Err(err) => EditResult::failed(err.to_string()),
    }
}

fn run(source: &str, language: Language, request: &EditRequest) -> Result<String> {
    enter(Stage::Validating);
    let op = validate(request)?;

    enter(Stage::Parsing);
    let extractor = extractor_for(language);
    let symbols = extractor.extract(source)?;

    let query = SymbolQuery {
        kind: request.symbol_kind,
        qualifier: request.qualifier.as_deref(),
    };

    let candidate = match op {
        Op::Replace(content) => {
            enter(Stage::Resolving);
            let target = resolve(&symbols, &request.symbol, query)?;
            enter(Stage::Adjusting);
            let span = adjust::replace_span(target);
            enter(Stage::Applying);
            apply::replace(source, &span, content)?
        }
        Op::Delete => {
            enter(Stage::Resolving);
            let target = resolve(&symbols, &request.symbol, query)?;
            enter(Stage::Adjusting);
            let span = adjust::delete_span(source, target);
            enter(Stage::Applying);
            apply::delete(source, &span)?
        }
        Op::Insert {
            content,
            position,
            anchor,
        } => {
            enter(Stage::Resolving);
            let anchor_symbol = resolve(&symbols, anchor, SymbolQuery::default())?;
            enter(Stage::Adjusting);
            let point = adjust::insertion_point(anchor_symbol, position);
            enter(Stage::Applying);
            apply::insert(source, point.start, position, content)?
        }
    };

    enter(Stage::Verifying);
    if let Err(err) = extractor.extract(&candidate) {
        return Err(EditError::Verification(err.to_string()));
    }

    Ok(candidate)
}

/// Check request invariants and project out the operation's fields.
///
/// Error strings here are part of the crate's contract; tests assert them
/// verbatim.
fn validate(request: &EditRequest) -> Result<Op<'_>> {
    match request.operation {
        EditKind::Replace => {
            let content = request.content.as_deref().ok_or_else(|| {
                EditError::InvalidRequest("Content is required for replace operations".to_string())
            })?;
            Ok(Op::Replace(content))
        }
        EditKind::Insert => {
            let content = request.content.as_deref().ok_or_else(|| {
                EditError::InvalidRequest("Content is required for insert operations".to_string())
            })?;
            let anchor = request.anchor.as_ref().ok_or_else(|| {
                EditError::InvalidRequest(
                    "Insert configuration is required for insert operations".to_string(),
                )
            })?;
            let position = match anchor.position.as_str() {
                "before" => InsertPosition::Before,
                "after" => InsertPosition::After,
                _ => {
                    return Err(EditError::InvalidRequest(
                        "Invalid Position: must be 'before' or 'after'".to_string(),
                    ))
                }
            };
            Ok(Op::Insert {
                content,
                position,
                anchor: &anchor.relative_to,
            })
        }
        EditKind::Delete => Ok(Op::Delete),
    }
}
