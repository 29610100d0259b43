//! Process-backed renderer
//!
//! Each request spawns a fresh worker: a single JSON request line on stdin,
//! a single JSON result on stdout, exit status 0.

use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

use blender_protocol::{RenderRequest, RenderResult};

use super::{RenderError, Renderer};

/// Worker command used when none is configured
pub const DEFAULT_RENDERER: &str = "node blender-render.js";

/// Program and arguments of the render worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl RendererCommand {
    /// Split a whitespace-separated command line
    pub fn parse(command: &str) -> Result<Self, RenderError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(RenderError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

/// Renderer that runs one worker process per request
pub struct ProcessRenderer {
    command: RendererCommand,
}

impl ProcessRenderer {
    pub fn new(command: RendererCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &RendererCommand {
        &self.command
    }
}

impl Renderer for ProcessRenderer {
    fn render(&self, request: &RenderRequest) -> Result<RenderResult, RenderError> {
        let request_json = serde_json::to_string(request)?;

        let mut command = Command::new(&self.command.program);
        command
            .args(&self.command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(program = %self.command.program, component = %request.component_path, "spawning render worker");
        let mut child = command.spawn().map_err(|source| RenderError::Spawn {
            program: self.command.program.clone(),
            source,
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            writeln!(stdin, "{}", request_json)?;
        }

        let output = child.wait_with_output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::Exited {
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| RenderError::Protocol(format!("invalid result JSON: {}", e)))
    }
}
