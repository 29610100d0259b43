//! Token tree flattening.
//!
//! Key paths are built as follows:
//! - object children: `parent_child` (no leading underscore at the root)
//! - array elements: `parent<index>`, or `parent-<index>` for string elements
//!
//! When two tree paths flatten to the same key, the last one visited wins.
//! This is lossy: the earlier value is dropped, not merged.

use serde_json::{Map, Value};

/// Flat key path -> scalar token value, in visiting order.
pub type FlatTokenMap = Map<String, Value>;

/// Flatten a token tree.
///
/// Objects and arrays produce an object holding the flat map. Any other
/// input is returned unchanged.
pub fn flatten_tokens(tree: &Value) -> Value {
    match tree {
        Value::Object(_) | Value::Array(_) => Value::Object(flatten_map(tree)),
        other => other.clone(),
    }
}

/// Flatten a token tree into a [`FlatTokenMap`].
///
/// Scalars at the root yield an empty map.
pub fn flatten_map(tree: &Value) -> FlatTokenMap {
    let mut acc = FlatTokenMap::new();
    if tree.is_object() || tree.is_array() {
        flatten_into(tree, "", &mut acc);
    }
    acc
}

fn flatten_into(value: &Value, prefix: &str, acc: &mut FlatTokenMap) {
    match value {
        Value::String(_) | Value::Number(_) => {
            acc.insert(prefix.to_string(), value.clone());
        }
        Value::Object(children) => {
            for (key, child) in children {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}_{}", prefix, key)
                };
                flatten_into(child, &path, acc);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                if item.is_string() {
                    acc.insert(format!("{}-{}", prefix, index), item.clone());
                } else {
                    flatten_into(item, &format!("{}{}", prefix, index), acc);
                }
            }
        }
        // booleans and nulls carry no token value
        Value::Bool(_) | Value::Null => {}
    }
}
