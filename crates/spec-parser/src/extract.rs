//! Version-aware extraction of parameters, request bodies and responses
//!
//! Every schema read here goes through the [`ResolutionContext`], so the
//! output never carries `$ref`s except the ones the resolver deliberately
//! keeps inside composition keywords.

use crate::resolver::ResolutionContext;
use crate::types::{ParameterLocation, ParameterSpec};
use crate::version::SpecVersion;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

const JSON_MEDIA_TYPE: &str = "application/json";

/// Extracts named parameters (path, query, header, form) for one operation
pub struct ParameterExtractor;

impl ParameterExtractor {
    /// Merge path-item and operation parameters; operation entries override
    /// path-item entries with the same name.
    ///
    /// Swagger `in: body` parameters are left to [`RequestBodyExtractor`].
    pub fn extract(
        path_parameters: Option<&Value>,
        operation_parameters: Option<&Value>,
        ctx: &mut ResolutionContext<'_>,
    ) -> IndexMap<String, ParameterSpec> {
        let mut parameters = IndexMap::new();

        for list in [path_parameters, operation_parameters].into_iter().flatten() {
            let Some(items) = list.as_array() else {
                debug!("Ignoring non-array parameters list");
                continue;
            };
            for item in items {
                let resolved = ctx.resolve(item);
                if let Some((name, spec)) = Self::convert(&resolved) {
                    parameters.insert(name, spec);
                }
            }
        }

        parameters
    }

    fn convert(param: &Value) -> Option<(String, ParameterSpec)> {
        let obj = param.as_object()?;
        let name = obj.get("name")?.as_str()?;

        let location = match obj.get("in").and_then(Value::as_str) {
            None => ParameterLocation::Query,
            Some("body") => return None,
            Some(other) => match ParameterLocation::from_in(other) {
                Some(location) => location,
                None => {
                    debug!("Skipping parameter {} with unsupported location {}", name, other);
                    return None;
                }
            },
        };

        // Swagger 2 keeps type/enum/format on the parameter itself
        let schema = obj.get("schema").unwrap_or(param);

        let required = obj.get("required").and_then(Value::as_bool).unwrap_or(false)
            || location == ParameterLocation::Path;

        let description = obj
            .get("description")
            .and_then(Value::as_str)
            .or_else(|| schema.get("description").and_then(Value::as_str))
            .unwrap_or_default();

        Some((
            name.to_string(),
            parameter_spec(schema, description, required, location),
        ))
    }
}

/// Extracts request-body inputs for POST / PUT / PATCH operations
pub struct RequestBodyExtractor;

impl RequestBodyExtractor {
    pub fn extract(
        operation: &Value,
        version: SpecVersion,
        ctx: &mut ResolutionContext<'_>,
    ) -> IndexMap<String, ParameterSpec> {
        let body = if version.is_swagger() {
            Self::swagger_body(operation, ctx)
        } else {
            Self::openapi_body(operation, ctx)
        };

        match body {
            Some(body) => decompose_body(&body),
            None => IndexMap::new(),
        }
    }

    fn swagger_body(operation: &Value, ctx: &mut ResolutionContext<'_>) -> Option<BodySource> {
        let params = operation.get("parameters")?.as_array()?;

        params.iter().find_map(|param| {
            let resolved = ctx.resolve(param);
            if resolved.get("in").and_then(Value::as_str) != Some("body") {
                return None;
            }
            Some(BodySource {
                name: resolved
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("body")
                    .to_string(),
                required: resolved.get("required").and_then(Value::as_bool).unwrap_or(false),
                description: string_field(&resolved, "description"),
                schema: resolved.get("schema")?.clone(),
            })
        })
    }

    fn openapi_body(operation: &Value, ctx: &mut ResolutionContext<'_>) -> Option<BodySource> {
        let request_body = ctx.resolve(operation.get("requestBody")?);
        let schema = json_media(request_body.get("content")?)?.get("schema")?;

        Some(BodySource {
            name: "body".to_string(),
            required: request_body
                .get("required")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            description: string_field(&request_body, "description"),
            schema: schema.clone(),
        })
    }
}

/// Extracts the schema of the first 2xx response
pub struct ResponseExtractor;

impl ResponseExtractor {
    pub fn extract(
        operation: &Value,
        version: SpecVersion,
        ctx: &mut ResolutionContext<'_>,
    ) -> Option<Value> {
        let responses = operation.get("responses")?.as_object()?;
        let (status, response) = responses.iter().find(|(status, _)| status.starts_with('2'))?;

        let response = ctx.resolve(response);
        let schema = if version.is_swagger() {
            response.get("schema")
        } else {
            response
                .get("content")
                .and_then(json_media)
                .and_then(|media| media.get("schema"))
        };

        if schema.is_none() {
            debug!("Response {} carries no JSON schema", status);
        }
        schema.cloned()
    }
}

/// A request body before it is split into parameters
struct BodySource {
    name: String,
    required: bool,
    description: String,
    schema: Value,
}

/// Object bodies become one parameter per property; anything else is a
/// single body parameter.
fn decompose_body(body: &BodySource) -> IndexMap<String, ParameterSpec> {
    let schema = &body.schema;
    let mut parameters = IndexMap::new();

    if !is_object_like(schema) {
        let description = if body.description.is_empty() {
            string_field(schema, "description")
        } else {
            body.description.clone()
        };
        parameters.insert(
            body.name.clone(),
            parameter_spec(schema, &description, body.required, ParameterLocation::Body),
        );
        return parameters;
    }

    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return parameters;
    };

    for (name, property) in properties {
        let description = string_field(property, "description");
        parameters.insert(
            name.clone(),
            parameter_spec(
                property,
                &description,
                required.contains(&name.as_str()),
                ParameterLocation::Body,
            ),
        );
    }

    parameters
}

fn parameter_spec(
    schema: &Value,
    description: &str,
    required: bool,
    location: ParameterLocation,
) -> ParameterSpec {
    ParameterSpec {
        description: description.to_string(),
        required,
        location,
        param_type: schema_type(schema),
        enum_values: schema.get("enum").and_then(Value::as_array).cloned(),
        format: schema.get("format").and_then(Value::as_str).map(str::to_string),
    }
}

/// `type` of a schema. OpenAPI 3.1 type arrays (`["string", "null"]`) use
/// their first non-null entry.
fn schema_type(schema: &Value) -> String {
    let ty = match schema.get("type") {
        Some(Value::String(ty)) => Some(ty.as_str()),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|ty| *ty != "null"),
        _ => None,
    };
    ty.unwrap_or("string").to_string()
}

fn is_object_like(schema: &Value) -> bool {
    schema.get("type").and_then(Value::as_str) == Some("object")
        || (schema.get("type").is_none() && schema.get("properties").is_some())
}

/// `application/json` if present, else the first JSON-flavoured media type
fn json_media(content: &Value) -> Option<&Value> {
    let content = content.as_object()?;
    content.get(JSON_MEDIA_TYPE).or_else(|| {
        content
            .iter()
            .find(|(media_type, _)| media_type.contains("json"))
            .map(|(_, media)| media)
    })
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameters_defaults_and_schema_fields() {
        let root = json!({});
        let mut ctx = ResolutionContext::new(&root);
        let params = json!([
            {"name": "limit", "in": "query", "schema": {"type": "integer", "format": "int32"}},
            {"name": "order", "schema": {"type": "string", "enum": ["asc", "desc"]}},
            {"name": "X-Trace", "in": "header", "required": true, "description": "trace id"},
            {"in": "query", "schema": {"type": "string"}}
        ]);

        let extracted = ParameterExtractor::extract(None, Some(&params), &mut ctx);

        assert_eq!(extracted.len(), 3);
        let limit = &extracted["limit"];
        assert!(!limit.required);
        assert_eq!(limit.location, ParameterLocation::Query);
        assert_eq!(limit.param_type, "integer");
        assert_eq!(limit.format.as_deref(), Some("int32"));

        let order = &extracted["order"];
        assert_eq!(order.location, ParameterLocation::Query);
        assert_eq!(order.enum_values, Some(vec![json!("asc"), json!("desc")]));

        let trace = &extracted["X-Trace"];
        assert!(trace.required);
        assert_eq!(trace.param_type, "string");
        assert_eq!(trace.description, "trace id");
    }

    #[test]
    fn test_parameters_resolve_refs() {
        let root = json!({
            "components": {
                "parameters": {
                    "Limit": {
                        "name": "limit",
                        "in": "query",
                        "schema": {"$ref": "#/components/schemas/Count"}
                    }
                },
                "schemas": {"Count": {"type": "integer", "description": "how many"}}
            }
        });
        let mut ctx = ResolutionContext::new(&root);
        let params = json!([{"$ref": "#/components/parameters/Limit"}]);

        let extracted = ParameterExtractor::extract(None, Some(&params), &mut ctx);

        assert_eq!(extracted["limit"].param_type, "integer");
        assert_eq!(extracted["limit"].description, "how many");
    }

    #[test]
    fn test_operation_parameters_override_path_parameters() {
        let root = json!({});
        let mut ctx = ResolutionContext::new(&root);
        let path_params = json!([
            {"name": "id", "in": "path", "schema": {"type": "string"}},
            {"name": "verbose", "in": "query", "schema": {"type": "boolean"}}
        ]);
        let op_params = json!([
            {"name": "verbose", "in": "query", "schema": {"type": "integer"}}
        ]);

        let extracted = ParameterExtractor::extract(Some(&path_params), Some(&op_params), &mut ctx);

        assert_eq!(extracted.len(), 2);
        assert!(extracted["id"].required, "path parameters are always required");
        assert_eq!(extracted["verbose"].param_type, "integer");
    }

    #[test]
    fn test_swagger_inline_parameter_types() {
        let root = json!({});
        let mut ctx = ResolutionContext::new(&root);
        let params = json!([
            {"name": "status", "in": "query", "type": "array", "description": "filter"},
            {"name": "file", "in": "formData", "type": "file"},
            {"name": "session", "in": "cookie", "type": "string"},
            {"name": "payload", "in": "body", "schema": {"type": "object"}}
        ]);

        let extracted = ParameterExtractor::extract(None, Some(&params), &mut ctx);

        assert_eq!(extracted.len(), 2);
        assert_eq!(extracted["status"].param_type, "array");
        assert_eq!(extracted["file"].location, ParameterLocation::Body);
        assert!(!extracted.contains_key("session"));
        assert!(!extracted.contains_key("payload"));
    }

    #[test]
    fn test_openapi_request_body_decomposes_object() {
        let root = json!({
            "components": {"schemas": {
                "NewUser": {
                    "type": "object",
                    "required": ["name", "email"],
                    "properties": {
                        "name": {"type": "string", "description": "full name"},
                        "email": {"type": "string", "format": "email"},
                        "age": {"type": "integer"}
                    }
                }
            }}
        });
        let mut ctx = ResolutionContext::new(&root);
        let operation = json!({
            "requestBody": {
                "content": {
                    "application/json": {"schema": {"$ref": "#/components/schemas/NewUser"}}
                }
            }
        });

        let body = RequestBodyExtractor::extract(&operation, SpecVersion::OpenApi30, &mut ctx);

        assert_eq!(body.len(), 3);
        assert!(body["name"].required);
        assert!(body["email"].required);
        assert!(!body["age"].required);
        assert_eq!(body["name"].location, ParameterLocation::Body);
        assert_eq!(body["name"].description, "full name");
        assert_eq!(body["email"].format.as_deref(), Some("email"));
    }

    #[test]
    fn test_openapi_request_body_falls_back_to_json_variant() {
        let root = json!({});
        let mut ctx = ResolutionContext::new(&root);
        let operation = json!({
            "requestBody": {
                "required": true,
                "content": {
                    "text/plain": {"schema": {"type": "string"}},
                    "application/merge-patch+json": {
                        "schema": {"type": "array", "items": {"type": "string"}}
                    }
                }
            }
        });

        let body = RequestBodyExtractor::extract(&operation, SpecVersion::OpenApi31, &mut ctx);

        assert_eq!(body.len(), 1);
        assert_eq!(body["body"].param_type, "array");
        assert!(body["body"].required);
    }

    #[test]
    fn test_swagger_request_body_from_body_parameter() {
        let root = json!({
            "definitions": {
                "Pet": {
                    "type": "object",
                    "required": ["name"],
                    "properties": {"name": {"type": "string"}, "tag": {"type": "string"}}
                }
            }
        });
        let mut ctx = ResolutionContext::new(&root);
        let operation = json!({
            "parameters": [
                {"name": "dryRun", "in": "query", "type": "boolean"},
                {"name": "pet", "in": "body", "schema": {"$ref": "#/definitions/Pet"}}
            ]
        });

        let body = RequestBodyExtractor::extract(&operation, SpecVersion::Swagger2, &mut ctx);

        assert_eq!(body.len(), 2);
        assert!(body["name"].required);
        assert!(!body["tag"].required);
        assert!(!body.contains_key("dryRun"));
    }

    #[test]
    fn test_missing_request_body_is_empty() {
        let root = json!({});
        let mut ctx = ResolutionContext::new(&root);

        let no_body = json!({});
        for version in [SpecVersion::OpenApi30, SpecVersion::Swagger2] {
            assert!(RequestBodyExtractor::extract(&no_body, version, &mut ctx).is_empty());
        }
    }

    #[test]
    fn test_response_picks_first_2xx_in_order() {
        let root = json!({
            "components": {"schemas": {
                "User": {"type": "object", "properties": {"id": {"type": "string"}}}
            }}
        });
        let mut ctx = ResolutionContext::new(&root);
        let operation = json!({
            "responses": {
                "404": {"content": {"application/json": {"schema": {"type": "string"}}}},
                "201": {"content": {"application/json": {
                    "schema": {"$ref": "#/components/schemas/User"}
                }}},
                "200": {"content": {"application/json": {"schema": {"type": "integer"}}}}
            }
        });

        let schema =
            ResponseExtractor::extract(&operation, SpecVersion::OpenApi30, &mut ctx).unwrap();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["id"]["type"], "string");
    }

    #[test]
    fn test_swagger_response_schema() {
        let root = json!({"definitions": {"Pets": {"type": "array", "items": {"type": "string"}}}});
        let mut ctx = ResolutionContext::new(&root);
        let operation = json!({
            "responses": {
                "200": {"description": "ok", "schema": {"$ref": "#/definitions/Pets"}}
            }
        });

        let schema =
            ResponseExtractor::extract(&operation, SpecVersion::Swagger2, &mut ctx).unwrap();

        assert_eq!(schema["type"], "array");
    }

    #[test]
    fn test_response_without_2xx_or_schema() {
        let root = json!({});
        let mut ctx = ResolutionContext::new(&root);

        let errors_only = json!({"responses": {"default": {"description": "error"}}});
        let version = SpecVersion::OpenApi30;
        assert!(ResponseExtractor::extract(&errors_only, version, &mut ctx).is_none());

        let no_content = json!({"responses": {"204": {"description": "deleted"}}});
        assert!(ResponseExtractor::extract(&no_content, version, &mut ctx).is_none());
    }

    #[test]
    fn test_schema_type_handles_type_arrays() {
        assert_eq!(schema_type(&json!({"type": ["null", "integer"]})), "integer");
        assert_eq!(schema_type(&json!({})), "string");
    }
}
