//! Run summary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use super::failure::{ExitCode, Status};
use super::package_summary::PackageSummary;

/// File name the summary is written under in the output directory
pub const RUN_SUMMARY_FILE: &str = "blender-summary.json";

/// Aggregated outcome of a blend run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Run identifier
    pub run_id: String,

    /// When the summary was created
    pub created_at: DateTime<Utc>,

    /// Aggregated status
    pub status: Status,

    /// Aggregated exit code
    pub code: i32,

    /// One line per failed package
    pub errors: Vec<String>,

    /// Informational notes collected during the run
    pub messages: Vec<String>,

    /// Total packages processed
    pub package_count: usize,

    /// Count of packages with status=success
    pub packages_succeeded: usize,

    /// Count of packages with status=failed
    pub packages_failed: usize,

    /// Wall-clock duration of the entire run in milliseconds
    pub duration_ms: u64,

    /// Human-readable summary
    pub human_summary: String,

    /// Per-package detail
    pub packages: Vec<PackageSummary>,
}

impl RunSummary {
    /// Aggregate package summaries
    pub fn from_package_summaries(run_id: String, summaries: Vec<PackageSummary>, duration_ms: u64) -> Self {
        let packages_failed = summaries.iter().filter(|s| s.status.is_failure()).count();
        let package_count = summaries.len();
        let packages_succeeded = package_count - packages_failed;

        let (status, code) = if packages_failed > 0 {
            (Status::Failed, ExitCode::Failed)
        } else {
            (Status::Success, ExitCode::Success)
        };

        let errors = summaries.iter().filter_map(PackageSummary::error_line).collect();

        Self {
            run_id,
            created_at: Utc::now(),
            status,
            code: code.as_i32(),
            errors,
            messages: Vec::new(),
            package_count,
            packages_succeeded,
            packages_failed,
            duration_ms,
            human_summary: Self::generate_human_summary(status, package_count, packages_succeeded, packages_failed),
            packages: summaries,
        }
    }

    /// Append an informational message
    pub fn push_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    fn generate_human_summary(status: Status, count: usize, succeeded: usize, failed: usize) -> String {
        match status {
            Status::Success if count == 0 => "No packages to blend".to_string(),
            Status::Success => format!("Blend succeeded: {}/{} packages blended", succeeded, count),
            Status::Failed => format!("Blend failed: {} blended, {} failed", succeeded, failed),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Write to file
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("JSON error: {}", e))
        })?;
        fs::write(path, json)
    }

    /// Load from file
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("JSON error: {}", e)))
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from_i32(self.code).unwrap_or(ExitCode::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::super::failure::FailureKind;
    use super::*;

    fn success(name: &str) -> PackageSummary {
        PackageSummary::success(name, "1.0.0", 3, 10)
    }

    fn failed(name: &str) -> PackageSummary {
        PackageSummary::failure(name, "1.0.0", FailureKind::Render, "boom", 10)
    }

    #[test]
    fn test_all_succeeded() {
        let summary = RunSummary::from_package_summaries(
            "run-1".to_string(),
            vec![success("@westpac/a"), success("@westpac/b")],
            20,
        );

        assert_eq!(summary.status, Status::Success);
        assert_eq!(summary.code, 0);
        assert!(summary.errors.is_empty());
        assert_eq!(summary.human_summary, "Blend succeeded: 2/2 packages blended");
    }

    #[test]
    fn test_failure_sets_code_and_errors() {
        let summary = RunSummary::from_package_summaries(
            "run-2".to_string(),
            vec![success("@westpac/a"), failed("@westpac/b"), success("@westpac/c")],
            30,
        );

        assert_eq!(summary.status, Status::Failed);
        assert_eq!(summary.exit_code(), ExitCode::Failed);
        assert_eq!(summary.packages_succeeded, 2);
        assert_eq!(summary.packages_failed, 1);
        assert_eq!(summary.errors, vec!["@westpac/b: Render failed: boom"]);
    }

    #[test]
    fn test_empty() {
        let summary = RunSummary::from_package_summaries("run-3".to_string(), Vec::new(), 0);
        assert_eq!(summary.code, 0);
        assert_eq!(summary.human_summary, "No packages to blend");
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RUN_SUMMARY_FILE);

        let mut summary = RunSummary::from_package_summaries("run-4".to_string(), vec![failed("@westpac/x")], 5);
        summary.push_message("wrote 3 files");
        summary.write_to_file(&path).unwrap();

        let loaded = RunSummary::from_file(&path).unwrap();
        assert_eq!(loaded.run_id, "run-4");
        assert_eq!(loaded.messages, vec!["wrote 3 files"]);
        assert_eq!(loaded.packages[0].failure_kind, Some(FailureKind::Render));
    }
}
