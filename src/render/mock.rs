//! In-process renderer for tests
//!
//! Results are keyed by component path. Unknown paths render as
//! `RECIPE_NOT_FOUND`, and worker crashes can be injected per path.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use blender_protocol::{RenderFailure, RenderRequest, RenderResult};

use super::{RenderError, Renderer};

#[derive(Debug, Clone)]
enum MockOutcome {
    Result(RenderResult),
    Crash(String),
}

#[derive(Debug, Default)]
struct MockState {
    outcomes: HashMap<String, MockOutcome>,
    requests: Vec<RenderRequest>,
}

/// Configurable mock renderer
#[derive(Debug, Clone, Default)]
pub struct MockRenderer {
    state: Arc<Mutex<MockState>>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Return `result` for requests on `component_path`
    pub fn with_result(self, component_path: impl Into<String>, result: RenderResult) -> Self {
        self.state()
            .outcomes
            .insert(component_path.into(), MockOutcome::Result(result));
        self
    }

    /// Simulate a worker that exits non-zero for `component_path`
    pub fn with_crash(self, component_path: impl Into<String>, stderr: impl Into<String>) -> Self {
        self.state()
            .outcomes
            .insert(component_path.into(), MockOutcome::Crash(stderr.into()));
        self
    }

    /// Requests seen so far, in order
    pub fn requests(&self) -> Vec<RenderRequest> {
        self.state().requests.clone()
    }
}

impl Renderer for MockRenderer {
    fn render(&self, request: &RenderRequest) -> Result<RenderResult, RenderError> {
        let mut state = self.state();
        state.requests.push(request.clone());

        match state.outcomes.get(&request.component_path) {
            Some(MockOutcome::Result(result)) => Ok(result.clone()),
            Some(MockOutcome::Crash(stderr)) => Err(RenderError::Exited {
                status: "exit status: 1".to_string(),
                stderr: stderr.clone(),
            }),
            None => Ok(RenderResult::error(RenderFailure::recipe_not_found(
                &request.component_path,
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blender_protocol::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_canned_result() {
        let renderer = MockRenderer::new().with_result(
            "/a/recipe.js",
            RenderResult::ok("<p></p>", ".css-1-a{}", vec!["1-a".into()]),
        );

        let result = renderer.render(&RenderRequest::new("/a/recipe.js", json!({}))).unwrap();
        assert!(result.is_ok());
        assert_eq!(result.css(), ".css-1-a{}");
    }

    #[test]
    fn test_unknown_path_not_found() {
        let renderer = MockRenderer::new();
        let result = renderer.render(&RenderRequest::new("/b/recipe.js", json!({}))).unwrap();

        assert!(!result.is_ok());
        assert_eq!(result.error.unwrap().code, ErrorCode::RecipeNotFound);
    }

    #[test]
    fn test_crash() {
        let renderer = MockRenderer::new().with_crash("/c/recipe.js", "segfault");
        assert!(matches!(
            renderer.render(&RenderRequest::new("/c/recipe.js", json!({}))),
            Err(RenderError::Exited { .. })
        ));
    }

    #[test]
    fn test_requests_recorded() {
        let renderer = MockRenderer::new();
        let _ = renderer.render(&RenderRequest::new("/x", json!({"BRAND": "WBC"})));
        let _ = renderer.render(&RenderRequest::new("/y", json!({})));

        let seen: Vec<String> = renderer.requests().into_iter().map(|r| r.component_path).collect();
        assert_eq!(seen, vec!["/x", "/y"]);
    }
}
