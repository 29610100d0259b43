//! Run summaries and failure taxonomy

mod failure;
mod package_summary;
mod run_summary;

pub use failure::{ExitCode, FailureKind, Status};
pub use package_summary::PackageSummary;
pub use run_summary::{RunSummary, RUN_SUMMARY_FILE};
