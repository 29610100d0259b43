//! Failure taxonomy and exit codes

use serde::{Deserialize, Serialize};

/// Package/run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Package blended
    Success,
    /// Package failed; the rest of the run continued
    Failed,
}

impl Status {
    pub fn is_failure(&self) -> bool {
        matches!(self, Status::Failed)
    }
}

/// Failure kind - categorizes why a package failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// The render worker crashed, exited non-zero or spoke garbage
    Worker,
    /// The render worker reported an error result
    Render,
    /// Two hashes claim the same logical name
    Labels,
    /// The package's script asset could not be read
    Script,
}

impl FailureKind {
    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            FailureKind::Worker => "Render worker failed",
            FailureKind::Render => "Render failed",
            FailureKind::Labels => "Conflicting style labels",
            FailureKind::Script => "Script asset unreadable",
        }
    }
}

/// Process exit codes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ExitCode {
    /// Every package blended
    #[default]
    Success = 0,
    /// At least one package failed, or the input was invalid
    Failed = 1,
    /// Setup failed before any package was processed
    Fatal = 2,
}

impl ExitCode {
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(ExitCode::Success),
            1 => Some(ExitCode::Failed),
            2 => Some(ExitCode::Fatal),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExitCode::Success)
    }
}
