//! Render collaborator boundary
//!
//! Rendering a component happens outside this process. Provides:
//! - Renderer trait: request/response interface to the collaborator
//! - ProcessRenderer: one isolated worker process per request
//! - MockRenderer: in-process canned results for tests

mod mock;
mod process;

pub use mock::MockRenderer;
pub use process::{ProcessRenderer, RendererCommand, DEFAULT_RENDERER};

use std::io;

use blender_protocol::{RenderRequest, RenderResult};

/// Renders one component
pub trait Renderer: Send + Sync {
    /// Render a request; an `Err` means the worker itself failed
    fn render(&self, request: &RenderRequest) -> Result<RenderResult, RenderError>;
}

/// Renderer errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("empty renderer command")]
    EmptyCommand,

    #[error("failed to spawn renderer '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("renderer exited with {status}: {stderr}")]
    Exited { status: String, stderr: String },

    #[error("protocol error: {0}")]
    Protocol(String),
}
