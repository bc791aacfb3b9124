//! Type definitions for compiled API specifications

use crate::version::SpecVersion;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded spec document: JSON or YAML, already turned into a value tree
pub type SpecDocument = Value;

/// HTTP methods that produce tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// All methods, in the order they are read from a path item
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Match a path-item key such as `get` or `POST`
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(key))
    }

    /// Whether a request body is read for this method
    pub fn accepts_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a parameter travels in the HTTP request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Path,
    Header,
    Body,
}

impl ParameterLocation {
    /// Map an `in` value. `formData` travels in the body; anything
    /// unrepresentable (e.g. `cookie`) yields `None`.
    pub fn from_in(value: &str) -> Option<Self> {
        match value {
            "query" => Some(ParameterLocation::Query),
            "path" => Some(ParameterLocation::Path),
            "header" => Some(ParameterLocation::Header),
            "body" | "formData" => Some(ParameterLocation::Body),
            _ => None,
        }
    }
}

/// One input of a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub description: String,
    pub required: bool,
    pub location: ParameterLocation,
    #[serde(rename = "type")]
    pub param_type: String,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// A callable tool compiled from one operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// camelCase identifier
    pub name: String,
    pub description: String,
    pub method: HttpMethod,
    /// Path template, e.g. `/users/{id}`
    pub path: String,
    pub parameters: IndexMap<String, ParameterSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Something the parser noticed but did not fail on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// An operation contributed no tool
    SkippedOperation {
        method: String,
        path: String,
        reason: String,
    },
    /// Several tools share a name; all of them were kept
    NameCollision { name: String, paths: Vec<String> },
}

/// The compiled result of one parse call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSpecification {
    pub base_url: String,
    pub title: String,
    pub version: String,
    pub description: String,
    pub spec_version: SpecVersion,
    pub tools: Vec<ToolDefinition>,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
    pub raw_document: SpecDocument,
}

impl ApiSpecification {
    /// Look up a tool by name. With colliding names the first one wins.
    pub fn tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }
}

/// Caller-supplied knobs for a parse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Replaces whatever base URL the document declares
    pub base_url: Option<String>,
    /// Resource allow-list matched against the first path segment
    pub resources: Vec<String>,
    /// Stripped from paths before resource matching
    pub path_prefix: Option<String>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources = resources.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(prefix.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_from_key_is_case_insensitive() {
        assert_eq!(HttpMethod::from_key("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_key("PATCH"), Some(HttpMethod::Patch));
        assert_eq!(HttpMethod::from_key("Delete"), Some(HttpMethod::Delete));
        assert_eq!(HttpMethod::from_key("head"), None);
        assert_eq!(HttpMethod::from_key("parameters"), None);
    }

    #[test]
    fn test_parameter_location_from_in() {
        assert_eq!(ParameterLocation::from_in("formData"), Some(ParameterLocation::Body));
        assert_eq!(ParameterLocation::from_in("cookie"), None);
    }

    #[test]
    fn test_parameter_spec_serializes_type_and_enum() {
        let spec = ParameterSpec {
            description: String::new(),
            required: true,
            location: ParameterLocation::Query,
            param_type: "string".to_string(),
            enum_values: Some(vec![json!("asc"), json!("desc")]),
            format: None,
        };

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["type"], "string");
        assert_eq!(value["enum"], json!(["asc", "desc"]));
        assert_eq!(value["location"], "query");
        assert!(value.get("format").is_none());
    }

    #[test]
    fn test_parse_options_deserialize_camel_case() {
        let options: ParseOptions = serde_json::from_value(json!({
            "baseUrl": "https://api.example.com",
            "resources": ["repos"],
            "pathPrefix": "/v1"
        }))
        .unwrap();

        assert_eq!(
            options,
            ParseOptions::new()
                .with_base_url("https://api.example.com")
                .with_resources(["repos"])
                .with_path_prefix("/v1")
        );

        let empty: ParseOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, ParseOptions::default());
    }
}
