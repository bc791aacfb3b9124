//! Spec version detection

use crate::error::{ParseError, ParseResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The spec dialects the extractors know how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecVersion {
    #[serde(rename = "swagger_2")]
    Swagger2,
    #[serde(rename = "openapi_3_0")]
    OpenApi30,
    #[serde(rename = "openapi_3_1")]
    OpenApi31,
    #[serde(rename = "openapi_3_2")]
    OpenApi32,
}

impl SpecVersion {
    /// Classify a document by its `swagger` / `openapi` field
    pub fn detect(document: &Value) -> ParseResult<Self> {
        if let Some(swagger) = document.get("swagger") {
            return match swagger.as_str() {
                Some(v) if v.starts_with("2.") => Ok(SpecVersion::Swagger2),
                _ => Err(ParseError::UnsupportedVersion(Self::describe(swagger))),
            };
        }

        if let Some(openapi) = document.get("openapi") {
            let version = openapi.as_str().unwrap_or_default();
            return if version.starts_with("3.0") {
                Ok(SpecVersion::OpenApi30)
            } else if version.starts_with("3.1") {
                Ok(SpecVersion::OpenApi31)
            } else if version.starts_with("3.2") {
                Ok(SpecVersion::OpenApi32)
            } else {
                Err(ParseError::UnsupportedVersion(Self::describe(openapi)))
            };
        }

        Err(ParseError::MissingVersionField)
    }

    pub fn is_swagger(&self) -> bool {
        matches!(self, SpecVersion::Swagger2)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecVersion::Swagger2 => "2.0",
            SpecVersion::OpenApi30 => "3.0",
            SpecVersion::OpenApi31 => "3.1",
            SpecVersion::OpenApi32 => "3.2",
        }
    }

    fn describe(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let family = if self.is_swagger() { "Swagger" } else { "OpenAPI" };
        write!(f, "{} {}", family, self.as_str())
    }
}
