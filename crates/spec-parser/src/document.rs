//! Decoding raw spec text into a [`SpecDocument`]

use crate::error::ParseResult;
use crate::types::SpecDocument;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static LARGE_BOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(\s*(?:minimum|maximum|exclusiveMinimum|exclusiveMaximum):\s*)(-?\d{16,})")
        .expect("valid large-bound regex")
});

/// Decode JSON or YAML (auto-detected) into a value tree
pub fn decode(content: &str) -> ParseResult<SpecDocument> {
    if content.trim_start().starts_with('{') {
        decode_json(content)
    } else {
        decode_yaml(content)
    }
}

pub fn decode_json(content: &str) -> ParseResult<SpecDocument> {
    Ok(serde_json::from_str(content)?)
}

pub fn decode_yaml(content: &str) -> ParseResult<SpecDocument> {
    let content = sanitize_large_numbers(content);
    Ok(serde_yaml::from_str(&content)?)
}

/// Clamp out-of-range `minimum` / `maximum` bounds before YAML decoding.
///
/// serde_yaml fails the whole document on an integer it cannot represent, so
/// one oversized bound on a schema would abort a parse that never reads it:
/// tool descriptors copy parameter types and carry response schemas through,
/// but no extractor inspects numeric bounds. JSON input is unaffected since
/// serde_json falls back to `f64`.
fn sanitize_large_numbers(content: &str) -> String {
    LARGE_BOUND
        .replace_all(content, |caps: &Captures| {
            let prefix = &caps[1];
            if caps[2].starts_with('-') {
                format!("{}-2147483648", prefix)
            } else {
                format!("{}2147483647", prefix)
            }
        })
        .into_owned()
}
