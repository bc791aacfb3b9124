//! Parse options from a file plus command-line overrides
//!
//! The options file is JSON or YAML with camelCase keys:
//!
//! ```yaml
//! baseUrl: https://sandbox.example.com
//! resources: [payments, refunds]
//! pathPrefix: /v1
//! ```

use std::path::Path;
use tracing::debug;

use crate::error::{CliError, Result};
use spec_parser::{document, ParseOptions};

/// Values given on the command line; each one replaces the file's value
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub base_url: Option<String>,
    pub resources: Vec<String>,
    pub path_prefix: Option<String>,
}

/// Load options from a JSON or YAML file
pub fn load_options(path: &Path) -> Result<ParseOptions> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    let value = document::decode(&content)?;
    let options = serde_json::from_value(value).map_err(|source| CliError::InvalidOptions {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Loaded parse options from {}", path.display());
    Ok(options)
}

/// Resolve the effective options: file (if any), then overrides
pub fn resolve_options(file: Option<&Path>, overrides: OptionOverrides) -> Result<ParseOptions> {
    let mut options = match file {
        Some(path) => load_options(path)?,
        None => ParseOptions::default(),
    };

    if let Some(base_url) = overrides.base_url {
        options.base_url = Some(base_url);
    }
    if !overrides.resources.is_empty() {
        options.resources = overrides.resources;
    }
    if let Some(prefix) = overrides.path_prefix {
        options.path_prefix = Some(prefix);
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn options_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_yaml_options() {
        let file = options_file("baseUrl: https://sandbox.example.com\nresources: [payments]\n");

        let options = load_options(file.path()).unwrap();

        assert_eq!(options.base_url.as_deref(), Some("https://sandbox.example.com"));
        assert_eq!(options.resources, vec!["payments".to_string()]);
        assert!(options.path_prefix.is_none());
    }

    #[test]
    fn test_load_json_options() {
        let file = options_file(r#"{"pathPrefix": "/v1"}"#);

        let options = load_options(file.path()).unwrap();

        assert_eq!(options.path_prefix.as_deref(), Some("/v1"));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let file =
            options_file("baseUrl: https://a.example.com\nresources: [a]\npathPrefix: /v1\n");
        let overrides = OptionOverrides {
            base_url: Some("https://b.example.com".to_string()),
            resources: vec!["b".to_string()],
            path_prefix: None,
        };

        let options = resolve_options(Some(file.path()), overrides).unwrap();

        assert_eq!(options.base_url.as_deref(), Some("https://b.example.com"));
        assert_eq!(options.resources, vec!["b".to_string()]);
        assert_eq!(options.path_prefix.as_deref(), Some("/v1"));
    }

    #[test]
    fn test_invalid_options_file() {
        let file = options_file("resources: 12\n");
        let err = load_options(file.path()).unwrap_err();
        assert!(matches!(err, CliError::InvalidOptions { .. }));

        let err = load_options(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, CliError::ReadError { .. }));
    }
}
