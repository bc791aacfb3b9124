//! Resource allow-list filtering
//!
//! A tool belongs to a resource when the first concrete segment of its path
//! (after an optional prefix such as `/v1`) equals the resource name. Only
//! whole segments match: `payment` does not select `/payments`.

use crate::types::ToolDefinition;
use tracing::debug;

/// Keep only tools whose first path segment is one of `resources`
pub fn filter_by_resources(
    tools: Vec<ToolDefinition>,
    resources: &[String],
    path_prefix: Option<&str>,
) -> Vec<ToolDefinition> {
    let wanted: Vec<String> = resources
        .iter()
        .map(|r| normalize_resource(r))
        .filter(|r| !r.is_empty())
        .collect();

    if wanted.is_empty() {
        return tools;
    }

    let before = tools.len();
    let kept: Vec<ToolDefinition> = tools
        .into_iter()
        .filter(|tool| {
            first_segment(&tool.path, path_prefix)
                .is_some_and(|segment| wanted.iter().any(|r| r.eq_ignore_ascii_case(segment)))
        })
        .collect();

    debug!(
        "Resource filter {:?} kept {} of {} tools",
        wanted,
        kept.len(),
        before
    );
    kept
}

/// First path segment that is neither empty nor a `{param}` placeholder
fn first_segment<'p>(path: &'p str, path_prefix: Option<&str>) -> Option<&'p str> {
    let path = match path_prefix {
        Some(prefix) => strip_prefix_ignore_case(path, prefix),
        None => path,
    };

    path.split(['/', '.'])
        .find(|segment| !segment.is_empty() && !segment.starts_with('{'))
}

/// Strip `prefix` when it covers whole leading segments of `path`
fn strip_prefix_ignore_case<'p>(path: &'p str, prefix: &str) -> &'p str {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return path;
    }

    let leading_slash = if prefix.starts_with('/') || !path.starts_with('/') {
        ""
    } else {
        "/"
    };
    let prefix_len = leading_slash.len() + prefix.len();

    let matches = path
        .get(..prefix_len)
        .is_some_and(|head| head.eq_ignore_ascii_case(&format!("{leading_slash}{prefix}")));
    if !matches {
        return path;
    }

    let rest = &path[prefix_len..];
    if rest.is_empty() || rest.starts_with(['/', '.']) {
        rest
    } else {
        path
    }
}

fn normalize_resource(resource: &str) -> String {
    resource.trim().trim_matches('/').to_lowercase()
}
