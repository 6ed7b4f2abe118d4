//! Graft error types.
//!
//! All errors are typed and carry enough context to produce the stable,
//! caller-facing strings the edit pipeline reports.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Graft operations.
#[derive(Error, Debug)]
pub enum EditError {
    /// I/O error during file operations.
    #[error("I/O error for path {}: {source}", .path.display())]
    Io {
        /// The file path that caused the I/O error.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed edit request (missing required field, invalid position).
    #[error("{0}")]
    InvalidRequest(String),

    /// Source text is not syntactically valid.
    #[error("Parse error: {message}")]
    Parse {
        /// The parse error message, including the failure location when known.
        message: String,
    },

    /// Named symbol does not exist in the parsed tree.
    #[error("Symbol '{0}' not found in file")]
    SymbolNotFound(String),

    /// Byte span out of bounds or off a character boundary.
    ///
    /// A contract violation between pipeline stages, never expected to
    /// surface from a correct resolve/adjust sequence.
    #[error("Invalid span ({start}, {end}) for text of length {len}")]
    InvalidSpan {
        /// Start byte offset.
        start: usize,
        /// End byte offset.
        end: usize,
        /// Length of the text the span was applied to.
        len: usize,
    },

    /// Post-edit re-parse of the candidate text failed.
    #[error("Edit rejected: modified source is not syntactically valid: {0}")]
    Verification(String),

    /// File extension maps to no supported language.
    #[error("Unsupported file type: {}", .0.display())]
    UnsupportedFile(PathBuf),
}

/// Result type alias for Graft operations.
pub type Result<T> = std::result::Result<T, EditError>;
