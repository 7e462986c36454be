//! Argument binding for relationship fields.
//!
//! A source path is a dotted path rooted at `parent` (the object being
//! resolved) or `args` (the relationship field's own arguments). A path
//! without a known root is read off the parent. Numeric segments index arrays.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

const PARENT_ROOT: &str = "parent";
const ARGS_ROOT: &str = "args";

/// Build the remote operation arguments from the relation's bindings.
///
/// Bindings whose path does not resolve are omitted from the result.
#[must_use]
pub fn bind_arguments(
    bindings: &BTreeMap<String, String>,
    parent: &Value,
    field_args: &Map<String, Value>,
) -> Map<String, Value> {
    let mut bound = Map::new();
    for (argument, path) in bindings {
        match lookup(path, parent, field_args) {
            Some(value) => {
                bound.insert(argument.clone(), value.clone());
            }
            None => {
                debug!(%argument, %path, "Binding path not present, argument omitted");
            }
        }
    }
    bound
}

fn lookup<'a>(path: &str, parent: &'a Value, field_args: &'a Map<String, Value>) -> Option<&'a Value> {
    if path == PARENT_ROOT {
        return Some(parent);
    }

    let (mut current, rest) = match path.split_once('.') {
        Some((PARENT_ROOT, rest)) => (parent, rest),
        Some((ARGS_ROOT, rest)) => match rest.split_once('.') {
            Some((name, rest)) => (field_args.get(name)?, rest),
            None => return field_args.get(rest),
        },
        _ => (parent, path),
    };

    for segment in rest.split('.') {
        current = step(current, segment)?;
    }
    Some(current)
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}
