//! Error types reported by the render worker.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error codes a worker may report.
///
/// These codes are stable and used for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed JSON or missing required fields.
    InvalidRequest,
    /// Protocol version not supported by the worker.
    UnsupportedProtocol,
    /// The recipe module could not be found or loaded.
    RecipeNotFound,
    /// The recipe threw while rendering.
    RecipeFailed,
    /// The brand object was rejected by the recipe.
    BrandInvalid,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "INVALID_REQUEST"),
            Self::UnsupportedProtocol => write!(f, "UNSUPPORTED_PROTOCOL"),
            Self::RecipeNotFound => write!(f, "RECIPE_NOT_FOUND"),
            Self::RecipeFailed => write!(f, "RECIPE_FAILED"),
            Self::BrandInvalid => write!(f, "BRAND_INVALID"),
        }
    }
}

/// Failure payload of an error result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFailure {
    /// Error code from the registry.
    pub code: ErrorCode,
    /// Human-readable, single-line error message.
    pub message: String,
}

impl RenderFailure {
    /// Create a new failure.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a RECIPE_NOT_FOUND failure.
    pub fn recipe_not_found(path: &str) -> Self {
        Self::new(ErrorCode::RecipeNotFound, format!("recipe '{}' could not be loaded", path))
    }
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for RenderFailure {}
