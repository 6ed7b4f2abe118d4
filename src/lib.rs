//! Graft: symbol-aware structural editing for source files.
//!
//! Graft locates a named declaration inside a source file by structural
//! position, never by line number or string matching, and performs a
//! replace, insert-relative-to, or delete while preserving the surrounding
//! text byte-for-byte. The result is always the complete rewritten file
//! text plus a success flag; persisting it is the caller's concern, so a
//! failed edit never leaves a file half-written.

#![warn(missing_docs)]
// env_logger and sha2 are used by src/main.rs (binary), not this library
#![expect(unused_crate_dependencies)]

pub mod adjust;
pub mod apply;
pub mod cli;
pub mod edit;
pub mod error;
pub mod extract;
pub mod proto;
pub mod resolve;
pub mod symbol;

/// Re-export the core entry point and request/result types.
pub use edit::{edit, EditKind, EditRequest, EditResult, InsertAnchor, InsertPosition};

/// Re-export common error types for convenience.
pub use error::{EditError, Result};

/// Re-export language detection for convenience.
pub use extract::{detect_language, Language};

/// Graft version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
