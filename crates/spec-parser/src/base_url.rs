//! Base URL extraction

use crate::version::SpecVersion;
use serde_json::Value;

const DEFAULT_SCHEME: &str = "https";

/// Pick the base URL: explicit override, else whatever the document declares
pub fn extract_base_url(document: &Value, version: SpecVersion, base_url: Option<&str>) -> String {
    let url = match base_url {
        Some(url) => url.to_string(),
        None if version.is_swagger() => swagger_base_url(document),
        None => openapi_base_url(document),
    };
    url.trim_end_matches('/').to_string()
}

/// `<scheme>://<host><basePath>`; without a host only `basePath` is known
fn swagger_base_url(document: &Value) -> String {
    let base_path = document
        .get("basePath")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let Some(host) = document.get("host").and_then(Value::as_str) else {
        return base_path.to_string();
    };

    let scheme = document
        .get("schemes")
        .and_then(Value::as_array)
        .and_then(|schemes| schemes.first())
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_SCHEME);

    format!("{}://{}{}", scheme, host, base_path)
}

/// First `servers` entry with `{variable}` placeholders set to their defaults
fn openapi_base_url(document: &Value) -> String {
    let Some(server) = document
        .get("servers")
        .and_then(Value::as_array)
        .and_then(|servers| servers.first())
    else {
        return String::new();
    };

    let mut url = server
        .get("url")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    if let Some(variables) = server.get("variables").and_then(Value::as_object) {
        for (name, variable) in variables {
            if let Some(default) = variable.get("default").and_then(Value::as_str) {
                url = url.replace(&format!("{{{}}}", name), default);
            }
        }
    }

    url
}
