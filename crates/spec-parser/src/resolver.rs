//! `$ref` resolver for spec documents
//!
//! Internal pointers (`#/...`) are expanded into their target subtree. Cycles
//! are cut with a placeholder schema, and every pointer is resolved at most
//! once per parse: results are memoized in the [`ResolutionContext`], which
//! lives exactly as long as one top-level parse call.
//!
//! Inside `anyOf` / `oneOf` / `allOf` branches, refs to object-shaped schemas
//! are left as `$ref` so discriminated unions stay readable.

use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// Composition keywords, in the priority order they are recognized
const COMPOSITION_KEYWORDS: [&str; 3] = ["anyOf", "oneOf", "allOf"];

const CIRCULAR_REFERENCE: &str = "Circular reference";
const UNRESOLVED_REFERENCE: &str = "Unresolved reference";

/// Per-parse resolution state
pub struct ResolutionContext<'a> {
    /// Document every pointer is looked up in
    root: &'a Value,
    /// Pointers currently being expanded
    stack: Vec<String>,
    /// Pointer -> resolved schema
    memo: HashMap<String, Value>,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self {
            root,
            stack: Vec::new(),
            memo: HashMap::new(),
        }
    }

    /// Resolve a node taken from (or built against) the root document
    pub fn resolve(&mut self, node: &Value) -> Value {
        self.resolve_node(node, false)
    }

    /// Look up an internal pointer such as `#/components/schemas/User`
    pub fn lookup(&self, pointer: &str) -> Option<&'a Value> {
        let path = pointer.strip_prefix('#')?;
        if path.is_empty() {
            return Some(self.root);
        }
        self.root.pointer(path)
    }

    /// Whether a pointer already has a cached resolution
    pub fn is_memoized(&self, pointer: &str) -> bool {
        self.memo.contains_key(pointer)
    }

    fn resolve_node(&mut self, node: &Value, inside_polymorphic: bool) -> Value {
        match node {
            Value::Object(obj) => {
                if let Some(keyword) = COMPOSITION_KEYWORDS
                    .iter()
                    .copied()
                    .find(|k| obj.contains_key(*k))
                {
                    return self.resolve_composition(obj, keyword, inside_polymorphic);
                }

                if let Some(pointer) = pure_ref(obj) {
                    return self.resolve_ref(node, pointer, inside_polymorphic);
                }

                Value::Object(
                    obj.iter()
                        .map(|(key, value)| {
                            (key.clone(), self.resolve_node(value, inside_polymorphic))
                        })
                        .collect(),
                )
            }
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.resolve_node(item, inside_polymorphic))
                    .collect(),
            ),
            _ => node.clone(),
        }
    }

    fn resolve_composition(
        &mut self,
        obj: &Map<String, Value>,
        keyword: &str,
        inside_polymorphic: bool,
    ) -> Value {
        let mut result = Map::new();
        for (key, value) in obj {
            let resolved = if key == keyword {
                // Branches are always resolved as polymorphic alternatives
                self.resolve_node(value, true)
            } else {
                self.resolve_node(value, inside_polymorphic)
            };
            result.insert(key.clone(), resolved);
        }
        Value::Object(result)
    }

    fn resolve_ref(&mut self, node: &Value, pointer: &str, inside_polymorphic: bool) -> Value {
        if !pointer.starts_with("#/") {
            return node.clone();
        }

        if inside_polymorphic {
            match self.lookup(pointer) {
                Some(target) if is_object_schema(target) => return node.clone(),
                None => return node.clone(),
                Some(_) => {}
            }
        }

        if let Some(cached) = self.memo.get(pointer) {
            return cached.clone();
        }

        if self.stack.iter().any(|p| p == pointer) {
            debug!("Circular $ref detected: {}", pointer);
            return self.memoize(pointer, placeholder(CIRCULAR_REFERENCE));
        }

        let Some(target) = self.lookup(pointer) else {
            debug!("Unresolved $ref: {}", pointer);
            return self.memoize(pointer, placeholder(UNRESOLVED_REFERENCE));
        };

        self.stack.push(pointer.to_string());
        let resolved = self.resolve_node(target, inside_polymorphic);
        self.stack.pop();

        self.memoize(pointer, resolved)
    }

    fn memoize(&mut self, pointer: &str, value: Value) -> Value {
        self.memo.insert(pointer.to_string(), value.clone());
        value
    }
}

/// The pointer of an object whose only key is a string `$ref`
fn pure_ref(obj: &Map<String, Value>) -> Option<&str> {
    if obj.len() != 1 {
        return None;
    }
    obj.get("$ref").and_then(Value::as_str)
}

fn is_object_schema(schema: &Value) -> bool {
    schema.get("type").and_then(Value::as_str) == Some("object")
        || schema.get("properties").is_some()
}

fn placeholder(description: &str) -> Value {
    json!({
        "type": "object",
        "description": description,
    })
}
