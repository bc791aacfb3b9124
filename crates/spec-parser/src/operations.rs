//! Operation mapping: one tool per (path, method)

use crate::error::SkipReason;
use crate::extract::{ParameterExtractor, RequestBodyExtractor, ResponseExtractor};
use crate::naming;
use crate::resolver::ResolutionContext;
use crate::types::{Diagnostic, HttpMethod, ToolDefinition};
use crate::version::SpecVersion;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

const FALLBACK_DESCRIPTION: &str = "No description provided";

/// Tools plus whatever was skipped or suspicious along the way
#[derive(Debug, Default)]
pub struct MappedOperations {
    pub tools: Vec<ToolDefinition>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Walks `paths` and builds tool definitions
pub struct OperationMapper<'a, 'r> {
    version: SpecVersion,
    ctx: &'r mut ResolutionContext<'a>,
}

impl<'a, 'r> OperationMapper<'a, 'r> {
    pub fn new(version: SpecVersion, ctx: &'r mut ResolutionContext<'a>) -> Self {
        Self { version, ctx }
    }

    /// Map every recognized operation under `paths`
    pub fn map_paths(&mut self, paths: &Value) -> MappedOperations {
        let mut mapped = MappedOperations::default();

        let Some(paths) = paths.as_object() else {
            debug!("Document has no paths object");
            return mapped;
        };

        for (path, path_item) in paths {
            let Some(item) = path_item.as_object() else {
                debug!("Skipping non-object path item {}", path);
                continue;
            };
            let path_parameters = item.get("parameters");

            for (key, operation) in item {
                let Some(method) = HttpMethod::from_key(key) else {
                    continue;
                };

                match self.map_operation(path, method, operation, path_parameters) {
                    Ok(tool) => mapped.tools.push(tool),
                    Err(reason) => {
                        warn!("Skipping {} {}: {}", method, path, reason);
                        mapped.diagnostics.push(Diagnostic::SkippedOperation {
                            method: method.to_string(),
                            path: path.clone(),
                            reason: reason.to_string(),
                        });
                    }
                }
            }
        }

        mapped
    }

    /// Build the tool for one operation, or say why there is none
    pub fn map_operation(
        &mut self,
        path: &str,
        method: HttpMethod,
        operation: &Value,
        path_parameters: Option<&Value>,
    ) -> Result<ToolDefinition, SkipReason> {
        if !operation.is_object() {
            return Err(SkipReason::MalformedOperation);
        }

        let operation_id = operation
            .get("operationId")
            .and_then(Value::as_str)
            .map(str::to_string);

        let name = naming::tool_name(operation_id.as_deref(), method, path)?;

        let description = ["summary", "description"]
            .iter()
            .find_map(|key| {
                operation
                    .get(*key)
                    .and_then(Value::as_str)
                    .filter(|text| !text.is_empty())
            })
            .unwrap_or(FALLBACK_DESCRIPTION)
            .to_string();

        let tags = operation
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let mut parameters =
            ParameterExtractor::extract(path_parameters, operation.get("parameters"), self.ctx);
        if method.accepts_body() {
            // Body properties win on collision
            parameters.extend(RequestBodyExtractor::extract(operation, self.version, self.ctx));
        }

        let response_schema = ResponseExtractor::extract(operation, self.version, self.ctx);

        Ok(ToolDefinition {
            name,
            description,
            method,
            path: path.to_string(),
            parameters,
            response_schema,
            operation_id,
            tags,
        })
    }
}

/// Names shared by more than one tool, in first-seen order.
///
/// Run this on the final tool list so every reported name is one a caller
/// can look up.
pub fn name_collisions(tools: &[ToolDefinition]) -> Vec<Diagnostic> {
    let mut by_name: IndexMap<&str, Vec<String>> = IndexMap::new();
    for tool in tools {
        by_name
            .entry(tool.name.as_str())
            .or_default()
            .push(format!("{} {}", tool.method, tool.path));
    }

    by_name
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(name, paths)| {
            warn!("Tool name {} is shared by {} operations", name, paths.len());
            Diagnostic::NameCollision {
                name: name.to_string(),
                paths,
            }
        })
        .collect()
}
