//! Render request types.

use serde::{Deserialize, Serialize};

use crate::PROTOCOL_VERSION;

/// Render request envelope.
///
/// Asks the worker to load `component_path` under the given brand and
/// return the rendered markup, the extracted styles and the style ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Protocol version of the host.
    pub protocol_version: i32,
    /// Absolute path of the recipe module to render.
    pub component_path: String,
    /// Brand object handed to the recipe (token tree plus brand code).
    pub brand: serde_json::Value,
    /// Optional markup rendered as children of the recipe root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<String>,
}

impl RenderRequest {
    /// Create a request for the current protocol version.
    pub fn new(component_path: impl Into<String>, brand: serde_json::Value) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION,
            component_path: component_path.into(),
            brand,
            children: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_children_omitted_when_absent() {
        let request = RenderRequest::new("/repo/node_modules/@westpac/button/blender/recipe.js", json!({"BRAND": "WBC"}));
        let text = serde_json::to_string(&request).unwrap();

        assert!(!text.contains("children"));
        assert!(text.contains("\"protocol_version\":1"));
    }
}
