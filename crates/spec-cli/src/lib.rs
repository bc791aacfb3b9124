//! # spec-cli
//!
//! Reads a spec file from disk, compiles it with [`spec_parser`] and renders
//! the result. All file access in the workspace lives here.

pub mod config;
mod error;

use std::path::Path;
use tracing::info;

use spec_parser::{document, ApiSpecification, ParseOptions, ParserRegistry};

pub use config::{load_options, resolve_options, OptionOverrides};
pub use error::{CliError, Result};

/// How the compiled specification is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// The full specification as JSON
    #[default]
    Json,
    /// Pretty-printed JSON
    PrettyJson,
    /// One tool name per line
    NamesOnly,
}

/// Read, decode and compile a spec file
pub fn compile_file(
    registry: &ParserRegistry,
    path: &Path,
    options: &ParseOptions,
) -> Result<ApiSpecification> {
    info!("Compiling spec: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| CliError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let document = document::decode(&content)?;

    Ok(registry.parse(&document, options)?)
}

/// Render a compiled specification for stdout
pub fn render(spec: &ApiSpecification, mode: OutputMode) -> Result<String> {
    let output = match mode {
        OutputMode::Json => serde_json::to_string(spec)?,
        OutputMode::PrettyJson => serde_json::to_string_pretty(spec)?,
        OutputMode::NamesOnly => spec
            .tools
            .iter()
            .map(|tool| tool.name.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(output)
}
