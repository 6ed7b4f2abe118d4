//! Language detection from file extensions.
//!
//! Table-driven language detection. No heuristics, no guessing.
//! Unknown extensions return None, never infer from content.

use std::path::Path;

/// Source languages with an extraction backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// Rust (.rs)
    Rust,
    /// Python (.py)
    Python,
    /// JavaScript (.js, .mjs, .cjs)
    JavaScript,
    /// TypeScript (.ts)
    TypeScript,
    /// Java (.java)
    Java,
}

impl Language {
    /// Convert language to string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
        }
    }
}

/// Detect source language from file path.
///
/// Uses table-driven extension mapping. Returns None for unknown extensions.
/// Never guesses or infers from file content.
pub fn detect_language(path: &Path) -> Option<Language> {
    let extension = path.extension()?.to_str()?;

    let language = match extension {
        // Rust
        "rs" => Language::Rust,

        // Python
        "py" => Language::Python,

        // JavaScript
        "js" | "mjs" | "cjs" => Language::JavaScript,

        // TypeScript
        "ts" => Language::TypeScript,

        // Java
        "java" => Language::Java,

        // Unknown extension
        _ => return None,
    };

    Some(language)
}
