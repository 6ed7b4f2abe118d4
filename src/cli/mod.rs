//! Command-line interface for Graft.
//!
//! This module handles argument parsing and user interface only.
//! NO edit logic is performed here.

use clap::Parser;
use std::path::PathBuf;

use crate::edit::EditKind;
use crate::extract::Language;
use crate::symbol::SymbolKind;

/// Graft: symbol-aware structural editing for source files.
#[derive(Parser, Debug)]
#[command(name = "graft")]
#[command(author, version, about, long_about = None)]
#[command(subcommand_required = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available Graft commands.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// List the symbols declared in a source file as JSON.
    Parse {
        /// Path to the source file.
        #[arg(short, long)]
        file: PathBuf,

        /// Optional language override (auto-detect from extension by default).
        #[arg(long, value_name = "LANG")]
        language: Option<LanguageArg>,
    },

    /// Apply a structural edit to a named symbol.
    Edit {
        /// Path to the source file containing the symbol.
        #[arg(short, long)]
        file: PathBuf,

        /// Symbol name to edit (for insert, the name of the new symbol).
        #[arg(short, long)]
        symbol: String,

        /// Edit operation to perform.
        #[arg(short, long, value_name = "OP")]
        op: OperationArg,

        /// New content passed inline.
        #[arg(long, conflicts_with = "with_")]
        content: Option<String>,

        /// Path to a file containing the new content.
        #[arg(long = "with", value_name = "FILE")]
        with_: Option<PathBuf>,

        /// Insert position relative to the anchor symbol.
        #[arg(long, value_name = "POS")]
        position: Option<PositionArg>,

        /// Anchor symbol an insert is positioned against.
        #[arg(long, value_name = "SYMBOL")]
        anchor: Option<String>,

        /// Optional symbol kind hint for disambiguation.
        #[arg(short, long, value_name = "KIND")]
        kind: Option<KindArg>,

        /// Optional receiver/container hint for disambiguation.
        #[arg(short, long, value_name = "NAME")]
        qualifier: Option<String>,

        /// Optional language override (auto-detect from extension by default).
        #[arg(long, value_name = "LANG")]
        language: Option<LanguageArg>,

        /// Write the new content back to the file (atomic replace).
        #[arg(long)]
        write: bool,
    },

    /// Read one JSON command from stdin and reply on stdout.
    Pipe,
}

/// Edit operation.
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum OperationArg {
    /// Replace the symbol's declaration.
    Replace,
    /// Insert new content relative to an anchor symbol.
    Insert,
    /// Delete the symbol's declaration.
    Delete,
}

impl OperationArg {
    /// Convert to the core edit kind.
    pub fn to_edit_kind(self) -> EditKind {
        match self {
            OperationArg::Replace => EditKind::Replace,
            OperationArg::Insert => EditKind::Insert,
            OperationArg::Delete => EditKind::Delete,
        }
    }
}

/// Insert position.
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum PositionArg {
    /// Before the anchor symbol.
    Before,
    /// After the anchor symbol.
    After,
}

impl PositionArg {
    /// Convert to the wire string the request carries.
    pub fn as_str(self) -> &'static str {
        match self {
            PositionArg::Before => "before",
            PositionArg::After => "after",
        }
    }
}

/// Symbol kind for disambiguation.
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum KindArg {
    /// Free function.
    Function,
    /// Method attached to a type or class.
    Method,
    /// Type declaration (struct, class, enum, alias).
    Struct,
    /// Interface or trait declaration.
    Interface,
    /// Field of a struct, class, or interface.
    Field,
    /// Variable declaration.
    Variable,
    /// Constant declaration.
    Constant,
    /// Enum variant or member.
    Case,
}

impl KindArg {
    /// Convert to the core symbol kind.
    pub fn to_symbol_kind(self) -> SymbolKind {
        match self {
            KindArg::Function => SymbolKind::Function,
            KindArg::Method => SymbolKind::Method,
            KindArg::Struct => SymbolKind::Struct,
            KindArg::Interface => SymbolKind::Interface,
            KindArg::Field => SymbolKind::Field,
            KindArg::Variable => SymbolKind::Variable,
            KindArg::Constant => SymbolKind::Constant,
            KindArg::Case => SymbolKind::Case,
        }
    }
}

/// Source language.
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum LanguageArg {
    /// Rust (.rs)
    Rust,
    /// Python (.py)
    Python,
    /// JavaScript (.js, .mjs, .cjs)
    Javascript,
    /// TypeScript (.ts)
    Typescript,
    /// Java (.java)
    Java,
}

impl LanguageArg {
    /// Convert to the extract module language.
    pub fn to_language(self) -> Language {
        match self {
            LanguageArg::Rust => Language::Rust,
            LanguageArg::Python => Language::Python,
            LanguageArg::Javascript => Language::JavaScript,
            LanguageArg::Typescript => Language::TypeScript,
            LanguageArg::Java => Language::Java,
        }
    }
}

/// Parse command-line arguments.
///
/// This function is the entry point for CLI argument parsing.
/// It returns the parsed Cli struct or exits on error.
pub fn parse_args() -> Cli {
    Cli::parse()
}
