//! Render result types.

use serde::{Deserialize, Serialize};

use crate::error::RenderFailure;

/// Outcome of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStatus {
    Ok,
    Error,
}

/// Render result document.
///
/// `ids` is the ordered, possibly duplicated list of machine-generated
/// style identifiers (`<hash>-<logicalName>`) referenced by this render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderResult {
    /// Whether the render succeeded.
    pub status: RenderStatus,
    /// Rendered markup (present when status=ok).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Extracted stylesheet (present when status=ok).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    /// Style identifiers declared by the render.
    #[serde(default)]
    pub ids: Vec<String>,
    /// Failure details (present when status=error).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RenderFailure>,
}

impl RenderResult {
    /// Create a successful result.
    pub fn ok(html: impl Into<String>, css: impl Into<String>, ids: Vec<String>) -> Self {
        Self {
            status: RenderStatus::Ok,
            html: Some(html.into()),
            css: Some(css.into()),
            ids,
            error: None,
        }
    }

    /// Create an error result.
    pub fn error(failure: RenderFailure) -> Self {
        Self {
            status: RenderStatus::Error,
            html: None,
            css: None,
            ids: Vec::new(),
            error: Some(failure),
        }
    }

    /// Whether the render succeeded.
    pub fn is_ok(&self) -> bool {
        self.status == RenderStatus::Ok
    }

    /// Generated stylesheet, empty when absent.
    pub fn css(&self) -> &str {
        self.css.as_deref().unwrap_or_default()
    }

    /// Rendered markup, empty when absent.
    pub fn html(&self) -> &str {
        self.html.as_deref().unwrap_or_default()
    }
}
