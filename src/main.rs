//! Graft CLI binary
//!
//! This is the main entry point for the graft command-line interface.
//! The CLI is a thin adapter over existing APIs - NO logic is implemented
//! here beyond reading inputs and optionally persisting the result.

use graft::cli::{self, Commands};
use graft::edit::{EditRequest, InsertAnchor};
use graft::error::EditError;
use graft::proto;
use graft::Language;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = cli::parse_args();

    // Initialize logger if verbose
    if cli.verbose {
        env_logger::init();
    }

    let ok = match cli.command {
        Commands::Parse { file, language } => {
            execute_parse(&file, language.map(cli::LanguageArg::to_language))
        }

        Commands::Edit {
            file,
            symbol,
            op,
            content,
            with_,
            position,
            anchor,
            kind,
            qualifier,
            language,
            write,
        } => {
            let content = match load_content(content, with_.as_deref()) {
                Ok(content) => content,
                Err(err) => {
                    eprintln!("Error: {}", err);
                    return ExitCode::from(1);
                }
            };
            let request = EditRequest {
                symbol,
                operation: op.to_edit_kind(),
                content,
                anchor: anchor.map(|relative_to| InsertAnchor {
                    position: position
                        .map(cli::PositionArg::as_str)
                        .unwrap_or("")
                        .to_string(),
                    relative_to,
                }),
                symbol_kind: kind.map(cli::KindArg::to_symbol_kind),
                qualifier,
            };
            execute_edit(
                &file,
                language.map(cli::LanguageArg::to_language),
                &request,
                write,
            )
        }

        Commands::Pipe => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            proto::run(&mut input, &mut output)
        }
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Execute the parse command: extract symbols and print the protocol JSON.
fn execute_parse(file: &Path, language: Option<Language>) -> bool {
    let response = proto::parse_file(file, language);
    println!("{}", proto::to_json(&response));
    response.success
}

/// Execute the edit command.
///
/// Prints the protocol JSON; with `--write` the new content is also
/// persisted via an atomic temp-file replace. An unchanged content digest
/// skips the write.
fn execute_edit(
    file: &Path,
    language: Option<Language>,
    request: &EditRequest,
    write: bool,
) -> bool {
    let response = proto::edit_file(file, language, request);
    println!("{}", proto::to_json(&response));
    if !response.success {
        return false;
    }

    if write {
        if let Some(content) = &response.content {
            if let Err(err) = persist(file, content) {
                eprintln!("Error: {}", err);
                return false;
            }
        }
    }
    true
}

/// Load edit content from the inline flag or a file, whichever was given.
fn load_content(
    inline: Option<String>,
    from_file: Option<&Path>,
) -> Result<Option<String>, EditError> {
    match (inline, from_file) {
        (Some(content), _) => Ok(Some(content)),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map(Some)
            .map_err(|source| EditError::Io {
                path: path.to_path_buf(),
                source,
            }),
        (None, None) => Ok(None),
    }
}

/// Persist new content over the original file.
fn persist(path: &Path, content: &str) -> Result<(), EditError> {
    let original = std::fs::read(path).map_err(|source| EditError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let before = digest(&original);
    let after = digest(content.as_bytes());
    if before == after {
        log::info!("{}: content unchanged, skipping write", path.display());
        return Ok(());
    }

    write_atomic(path, content.as_bytes())?;
    log::info!("wrote {} ({} -> {})", path.display(), &before[..12], &after[..12]);
    Ok(())
}

/// Write to a temp file in the same directory, fsync, and rename over the
/// original.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), EditError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("tmp");
    let temp_path = dir.join(format!(".{}.graft.tmp", file_name));

    let io = (|| -> std::io::Result<()> {
        let mut temp = File::create(&temp_path)?;
        temp.write_all(content)?;
        temp.sync_all()?;
        std::fs::rename(&temp_path, path)?;
        Ok(())
    })();
    io.map_err(|source| EditError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// SHA-256 hex digest of file contents.
fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
