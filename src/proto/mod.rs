//! Line-oriented subprocess protocol.
//!
//! One JSON command per invocation on stdin, one JSON object on stdout,
//! non-zero process exit on failure. The parse response uses lowercase
//! field names; the edit response uses the PascalCase
//! `Success`/`Content`/`Error` casing. Both casings are part of the wire
//! contract callers bracket-match on.
//!
//! File reads happen at this layer; the core pipeline itself never touches
//! the filesystem, and the caller owns writing any returned content back.

use crate::edit::{edit, EditKind, EditRequest, EditResult, InsertAnchor};
use crate::error::{EditError, Result};
use crate::extract::{detect_language, extractor_for, Language};
use crate::symbol::{Symbol, SymbolKind};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Protocol operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// List the symbols declared in a file.
    Parse,
    /// Apply a structural edit to a file.
    Edit,
}

/// One protocol command.
#[derive(Debug, Deserialize)]
pub struct Command {
    /// Operation to perform.
    pub operation: Operation,
    /// File the operation targets.
    pub file: PathBuf,
    /// Edit specification; required when `operation` is `edit`.
    #[serde(default)]
    pub edit: Option<EditSpec>,
}

/// Wire form of an edit request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSpec {
    /// Target symbol name.
    pub symbol_name: String,
    /// `"replace"`, `"insert"`, or `"delete"`.
    pub edit_type: String,
    /// New content for replace/insert.
    #[serde(default)]
    pub new_content: Option<String>,
    /// Insert placement.
    #[serde(default)]
    pub insert_anchor: Option<AnchorSpec>,
    /// Optional kind hint for disambiguation.
    #[serde(default)]
    pub symbol_kind: Option<SymbolKind>,
    /// Optional receiver/container hint for disambiguation.
    #[serde(default)]
    pub qualifier: Option<String>,
}

/// Wire form of an insert anchor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorSpec {
    /// `"before"` or `"after"`.
    pub position: String,
    /// Symbol the insert is positioned against.
    pub relative_to_symbol: String,
}

impl EditSpec {
    /// Convert the wire form into a core edit request.
    pub fn to_request(&self) -> Result<EditRequest> {
        let operation = match self.edit_type.as_str() {
            "replace" => EditKind::Replace,
            "insert" => EditKind::Insert,
            "delete" => EditKind::Delete,
            other => {
                return Err(EditError::InvalidRequest(format!(
                    "Unknown edit type '{}': must be 'replace', 'insert', or 'delete'",
                    other
                )))
            }
        };
        Ok(EditRequest {
            symbol: self.symbol_name.clone(),
            operation,
            content: self.new_content.clone(),
            anchor: self.insert_anchor.as_ref().map(|anchor| InsertAnchor {
                position: anchor.position.clone(),
                relative_to: anchor.relative_to_symbol.clone(),
            }),
            symbol_kind: self.symbol_kind,
            qualifier: self.qualifier.clone(),
        })
    }
}

/// Response to a `parse` command.
#[derive(Debug, Serialize)]
pub struct ParseResponse {
    /// Whether parsing succeeded.
    pub success: bool,
    /// Extracted symbol tree on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbols: Option<Vec<Symbol>>,
    /// Error description on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response to an `edit` command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EditResponse {
    /// Whether the edit succeeded.
    pub success: bool,
    /// Complete modified file text on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Error description on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<EditResult> for EditResponse {
    fn from(result: EditResult) -> Self {
        EditResponse {
            success: result.success,
            content: result.content,
            error: result.error,
        }
    }
}

impl EditResponse {
    fn failure(error: String) -> Self {
        EditResponse {
            success: false,
            content: None,
            error: Some(error),
        }
    }
}

/// Parse a file and report its symbols.
pub fn parse_file(file: &Path, language: Option<Language>) -> ParseResponse {
    match try_parse(file, language) {
        Ok(symbols) => ParseResponse {
            success: true,
            symbols: Some(symbols),
            error: None,
        },
        Err(err) => ParseResponse {
            success: false,
            symbols: None,
            error: Some(err.to_string()),
        },
    }
}

fn try_parse(file: &Path, language: Option<Language>) -> Result<Vec<Symbol>> {
    let language = language_for(file, language)?;
    let source = read_source(file)?;
    extractor_for(language).extract(&source)
}

/// Run an edit against a file's current content.
///
/// The response carries the complete new text; persisting it is the
/// caller's responsibility.
pub fn edit_file(file: &Path, language: Option<Language>, request: &EditRequest) -> EditResponse {
    let language = match language_for(file, language) {
        Ok(language) => language,
        Err(err) => return EditResponse::failure(err.to_string()),
    };
    let source = match read_source(file) {
        Ok(source) => source,
        Err(err) => return EditResponse::failure(err.to_string()),
    };
    edit(&source, language, request).into()
}

/// Execute one protocol command, returning the response JSON and a success
/// flag for the process exit code.
pub fn handle_command(command: &Command) -> (String, bool) {
    match command.operation {
        Operation::Parse => {
            let response = parse_file(&command.file, None);
            (to_json(&response), response.success)
        }
        Operation::Edit => {
            let response = match &command.edit {
                Some(spec) => match spec.to_request() {
                    Ok(request) => edit_file(&command.file, None, &request),
                    Err(err) => EditResponse::failure(err.to_string()),
                },
                None => EditResponse::failure(
                    "Edit specification is required for edit operations".to_string(),
                ),
            };
            (to_json(&response), response.success)
        }
    }
}

/// Read one command from `input`, write one JSON response to `output`.
///
/// Returns the success flag; a `false` return maps to a non-zero exit.
pub fn run(input: &mut dyn BufRead, output: &mut dyn Write) -> bool {
    let mut line = String::new();
    if let Err(err) = input.read_line(&mut line) {
        let _ = writeln!(output, "{}", error_json(format!("failed to read command: {}", err)));
        return false;
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        let _ = writeln!(output, "{}", error_json("empty command".to_string()));
        return false;
    }

    let command: Command = match serde_json::from_str(trimmed) {
        Ok(command) => command,
        Err(err) => {
            let _ = writeln!(output, "{}", error_json(format!("malformed command: {}", err)));
            return false;
        }
    };

    let (json, ok) = handle_command(&command);
    let _ = writeln!(output, "{}", json);
    ok
}

fn language_for(file: &Path, language: Option<Language>) -> Result<Language> {
    if let Some(language) = language {
        return Ok(language);
    }
    detect_language(file).ok_or_else(|| EditError::UnsupportedFile(file.to_path_buf()))
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| EditError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a response, falling back to a minimal error envelope.
pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        format!("{{\"success\":false,\"error\":\"serialization failed: {}\"}}", err)
    })
}

fn error_json(message: String) -> String {
    to_json(&ParseResponse {
        success: false,
        symbols: None,
        error: Some(message),
    })
}
