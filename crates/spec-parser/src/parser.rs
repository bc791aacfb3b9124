//! OpenAPI / Swagger parser

use crate::base_url::extract_base_url;
use crate::document;
use crate::error::ParseResult;
use crate::filter::filter_by_resources;
use crate::operations::{name_collisions, OperationMapper};
use crate::registry::SpecFormat;
use crate::resolver::ResolutionContext;
use crate::types::*;
use crate::version::SpecVersion;
use serde_json::Value;
use tracing::{debug, info};

/// Compiles Swagger 2.0 and OpenAPI 3.x documents into tools
pub struct OpenApiParser;

impl OpenApiParser {
    /// Compile an already-decoded document
    pub fn parse_document(
        document: &SpecDocument,
        options: &ParseOptions,
    ) -> ParseResult<ApiSpecification> {
        let version = SpecVersion::detect(document)?;
        let info = document.get("info");
        let title = info_field(info, "title");

        debug!("Parsing {} spec: {}", version, title);

        let base_url = extract_base_url(document, version, options.base_url.as_deref());

        // Fresh per call: pointers are only meaningful against this root
        let mut ctx = ResolutionContext::new(document);
        let mapped = OperationMapper::new(version, &mut ctx)
            .map_paths(document.get("paths").unwrap_or(&Value::Null));

        debug!("Extracted {} tools", mapped.tools.len());

        let tools = filter_by_resources(
            mapped.tools,
            &options.resources,
            options.path_prefix.as_deref(),
        );

        let mut diagnostics = mapped.diagnostics;
        diagnostics.extend(name_collisions(&tools));

        info!(
            "Compiled {} tools from {} ({} diagnostics)",
            tools.len(),
            title,
            diagnostics.len()
        );

        Ok(ApiSpecification {
            base_url,
            title,
            version: info_field(info, "version"),
            description: info_field(info, "description"),
            spec_version: version,
            tools,
            diagnostics,
            raw_document: document.clone(),
        })
    }

    /// Decode JSON or YAML text and compile it
    pub fn parse_str(content: &str, options: &ParseOptions) -> ParseResult<ApiSpecification> {
        let document = document::decode(content)?;
        Self::parse_document(&document, options)
    }
}

impl SpecFormat for OpenApiParser {
    fn can_parse(&self, document: &SpecDocument) -> bool {
        document.get("openapi").is_some() || document.get("swagger").is_some()
    }

    fn format_name(&self) -> &str {
        "OpenAPI"
    }

    fn parse(
        &self,
        document: &SpecDocument,
        options: &ParseOptions,
    ) -> ParseResult<ApiSpecification> {
        Self::parse_document(document, options)
    }
}

fn info_field(info: Option<&Value>, key: &str) -> String {
    info.and_then(|i| i.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
