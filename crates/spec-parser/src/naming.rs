//! Tool name normalization
//!
//! Operation ids arrive in every convention there is (`FetchAccount`,
//! `admin_apps_approve`, `repos/disable-vulnerability-alerts`). Tools are
//! named in camelCase.

use crate::error::SkipReason;
use crate::types::HttpMethod;
use regex::Regex;
use std::sync::LazyLock;

/// lowercase letter or digit followed by an uppercase letter
static CASE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid case boundary regex"));

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/_\-.]+").expect("valid separator regex"));

/// Convert an identifier to camelCase.
///
/// Returns the input unchanged when it contains no usable tokens; callers
/// detect that with [`is_valid_name`].
pub fn normalize(raw: &str) -> String {
    let split = CASE_BOUNDARY.replace_all(raw, "$1 $2");
    let spaced = SEPARATORS.replace_all(&split, " ");

    let tokens: Vec<&str> = spaced.split(' ').filter(|t| !t.is_empty()).collect();
    let Some((first, rest)) = tokens.split_first() else {
        return raw.to_string();
    };

    let mut name = first.to_lowercase();
    for token in rest {
        let mut chars = token.chars();
        if let Some(head) = chars.next() {
            name.extend(head.to_uppercase());
            name.push_str(&chars.as_str().to_lowercase());
        }
    }
    name
}

/// Whether a name can be used as a tool identifier
pub fn is_valid_name(name: &str) -> bool {
    let starts_with_letter = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic());

    !name.is_empty() && starts_with_letter && name.chars().any(|c| c.is_ascii_alphanumeric())
}

/// Pick the tool name for an operation.
///
/// The operation id wins when it normalizes to a valid name; otherwise the
/// name is synthesized from the method and path. The synthesized candidate
/// always starts with the lowercase method, so for the fixed method set this
/// never returns [`SkipReason::InvalidName`]; the skip path is kept for
/// [`first_valid_name`] callers with arbitrary fallbacks.
pub fn tool_name(
    operation_id: Option<&str>,
    method: HttpMethod,
    path: &str,
) -> Result<String, SkipReason> {
    let synthesized = format!(
        "{}{}",
        method.as_str().to_lowercase(),
        path.replace(['/', '{', '}'], "")
    );

    first_valid_name(operation_id.into_iter().chain([synthesized.as_str()]))
}

/// Normalize each candidate in turn and return the first valid one.
///
/// When none qualifies, the normalized forms are reported back in
/// [`SkipReason::InvalidName`].
pub fn first_valid_name<'a>(
    candidates: impl IntoIterator<Item = &'a str>,
) -> Result<String, SkipReason> {
    let mut tried = Vec::new();

    for candidate in candidates {
        let name = normalize(candidate);
        if is_valid_name(&name) {
            return Ok(name);
        }
        tried.push(name);
    }

    Err(SkipReason::InvalidName { tried })
}
