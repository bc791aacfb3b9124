//! Error types for the spec parser

use thiserror::Error;

/// Result type alias for parser operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Fatal parser errors. Anything reported here aborts the whole parse.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unsupported spec version: {0}")]
    UnsupportedVersion(String),

    #[error("Missing version field: expected `swagger` or `openapi`")]
    MissingVersionField,

    #[error("No registered parser understands this document")]
    UnrecognizedFormat,

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Why a single operation contributed no tool.
///
/// These never abort a parse; the mapper turns them into diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("no valid tool name could be generated (tried {tried:?})")]
    InvalidName { tried: Vec<String> },

    #[error("operation is not an object")]
    MalformedOperation,
}
