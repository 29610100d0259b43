//! Per-package summary

use serde::{Deserialize, Serialize};

use super::failure::{FailureKind, Status};

/// Outcome of blending one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSummary {
    /// Package name
    pub name: String,

    /// Package version
    pub version: String,

    /// Package status
    pub status: Status,

    /// Failure kind (when status is failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_kind: Option<FailureKind>,

    /// Failure detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Identifiers involved in a label conflict
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub offending_ids: Vec<String>,

    /// Number of human-readable classes produced
    pub class_count: usize,

    /// Wall-clock time spent on the package in milliseconds
    pub duration_ms: u64,
}

impl PackageSummary {
    pub fn success(name: impl Into<String>, version: impl Into<String>, class_count: usize, duration_ms: u64) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            status: Status::Success,
            failure_kind: None,
            message: None,
            offending_ids: Vec::new(),
            class_count,
            duration_ms,
        }
    }

    pub fn failure(
        name: impl Into<String>,
        version: impl Into<String>,
        kind: FailureKind,
        message: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            status: Status::Failed,
            failure_kind: Some(kind),
            message: Some(message.into()),
            offending_ids: Vec::new(),
            class_count: 0,
            duration_ms,
        }
    }

    pub fn with_offending_ids(mut self, ids: Vec<String>) -> Self {
        self.offending_ids = ids;
        self
    }

    /// One-line error for the run summary, e.g. `@westpac/button: Render failed: boom`
    pub fn error_line(&self) -> Option<String> {
        let kind = self.failure_kind?;
        let mut line = format!("{}: {}", self.name, kind.description());
        if let Some(ref message) = self.message {
            line.push_str(": ");
            line.push_str(message);
        }
        if !self.offending_ids.is_empty() {
            line.push_str(&format!(" [{}]", self.offending_ids.join(", ")));
        }
        Some(line)
    }
}
