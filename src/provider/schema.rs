//! Schema normalization for Gemini structured output.
//!
//! Gemini's `responseSchema` accepts an OpenAPI subset: no `$ref`, no
//! `$defs`, no `additionalProperties`, and nullability is expressed with
//! `nullable` rather than a `["T", "null"]` type list. The schemas derived
//! with `schemars` use all of those, so they are rewritten here before being
//! sent. Local validation keeps using the unmodified schema.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::ForgeError;

/// Keywords Gemini rejects or ignores; dropped wherever they appear.
const STRIPPED_KEYWORDS: [&str; 7] = [
    "$schema",
    "$id",
    "$defs",
    "definitions",
    "$comment",
    "title",
    "additionalProperties",
];

/// Rewrite a JSON Schema into the dialect Gemini accepts.
pub fn normalize_for_gemini(schema: &Value) -> Result<Value, ForgeError> {
    let defs = schema
        .get("$defs")
        .or_else(|| schema.get("definitions"))
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    let mut resolving = HashSet::new();
    normalize(schema, &defs, &mut resolving)
}

fn normalize(
    schema: &Value,
    defs: &Map<String, Value>,
    resolving: &mut HashSet<String>,
) -> Result<Value, ForgeError> {
    let obj = match schema {
        Value::Object(obj) => obj,
        Value::Array(items) => {
            return items
                .iter()
                .map(|item| normalize(item, defs, resolving))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        other => return Ok(other.clone()),
    };

    if let Some(reference) = obj.get("$ref").and_then(Value::as_str) {
        return resolve_ref(reference, obj, defs, resolving);
    }

    let mut normalized = Map::new();
    for (key, value) in obj {
        if STRIPPED_KEYWORDS.contains(&key.as_str()) {
            continue;
        }
        let next = match key.as_str() {
            // Property names are user data, not keywords.
            "properties" => match value {
                Value::Object(props) => {
                    let mut out = Map::new();
                    for (name, prop) in props {
                        out.insert(name.clone(), normalize(prop, defs, resolving)?);
                    }
                    Value::Object(out)
                }
                other => other.clone(),
            },
            "type" => {
                if let Some((ty, nullable)) = split_nullable_type(value) {
                    if nullable {
                        normalized.insert("nullable".into(), Value::Bool(true));
                    }
                    ty
                } else {
                    value.clone()
                }
            }
            _ => normalize(value, defs, resolving)?,
        };
        normalized.insert(key.clone(), next);
    }
    Ok(Value::Object(normalized))
}

fn resolve_ref(
    reference: &str,
    site: &Map<String, Value>,
    defs: &Map<String, Value>,
    resolving: &mut HashSet<String>,
) -> Result<Value, ForgeError> {
    let name = reference
        .strip_prefix("#/$defs/")
        .or_else(|| reference.strip_prefix("#/definitions/"))
        .ok_or_else(|| {
            ForgeError::InvalidArgument(format!("unsupported schema reference '{reference}'"))
        })?;
    let target = defs.get(name).ok_or_else(|| {
        ForgeError::InvalidArgument(format!("schema reference '{reference}' has no definition"))
    })?;
    if !resolving.insert(name.to_string()) {
        return Err(ForgeError::InvalidArgument(format!(
            "recursive schema type '{name}' cannot be inlined for Gemini"
        )));
    }

    let mut resolved = normalize(target, defs, resolving)?;
    resolving.remove(name);

    // Keywords next to the $ref (usually a field description) win over the definition's.
    if let Value::Object(resolved_obj) = &mut resolved {
        for (key, value) in site {
            if key == "$ref" || STRIPPED_KEYWORDS.contains(&key.as_str()) {
                continue;
            }
            resolved_obj.insert(key.clone(), normalize(value, defs, resolving)?);
        }
    }
    Ok(resolved)
}

/// `["string", "null"]` -> (`"string"`, true). Returns `None` for anything
/// that is not a type list.
fn split_nullable_type(value: &Value) -> Option<(Value, bool)> {
    let types = value.as_array()?;
    let nullable = types.iter().any(|t| t == "null");
    let mut concrete = types.iter().filter(|t| *t != "null");
    let first = concrete.next()?.clone();
    if concrete.next().is_some() {
        // Gemini has no union types; leave it for the API to reject.
        return None;
    }
    Some((first, nullable))
}
