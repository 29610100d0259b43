//! Settings merge logic
//!
//! Layers are merged shallowly: each key's value is replaced wholesale by
//! the later layer. Objects and arrays are never merged recursively.

use serde_json::{Map, Value};

/// Overlay one layer on top of another.
pub fn shallow_merge(mut base: Map<String, Value>, overlay: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in overlay {
        base.insert(key, value);
    }
    base
}

/// Merge multiple layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<Map<String, Value>>) -> Map<String, Value> {
    layers.into_iter().fold(Map::new(), shallow_merge)
}
