//! Blend pipeline
//!
//! For each package, in resolution order:
//! - render the recipe under the brand
//! - validate the emitted labels
//! - rewrite machine classes into human-readable ones
//! - collect styles, markup and script
//!
//! Token compilation runs once per run. A failing package is recorded in the
//! run summary and never stops the remaining packages.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use blender_protocol::{RenderRequest, RenderResult};
use blender_tokens::{compile_tokens, TokenFormat};

use crate::classes::{convert_classes, RenderedMarkup};
use crate::context::{ContextError, RunContext};
use crate::labels::{get_valid_ids, test_labels};
use crate::output::{assemble, write_files, write_files_archive, OutputError};
use crate::packages::PackageDescriptor;
use crate::render::{RenderError, Renderer};
use crate::summary::{FailureKind, PackageSummary, RunSummary, RUN_SUMMARY_FILE};

/// Errors that stop a run before or after the per-package work
#[derive(Debug, Error)]
pub enum BlendError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("renderer error: {0}")]
    Render(#[from] RenderError),

    #[error("output error: {0}")]
    Output(#[from] OutputError),
}

/// Result type for blend operations
pub type BlendResult<T> = Result<T, BlendError>;

/// A package after rendering and class rewriting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlendedPackage {
    pub name: String,
    /// File-name form of the package name (`@westpac/button` -> `button`)
    pub file_stem: String,
    pub version: String,
    pub is_core: bool,
    pub css: String,
    pub html: String,
    /// Human-readable classes, in first-use order
    pub classes: Vec<String>,
    pub script: Option<String>,
}

/// Brand tokens in the requested format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTokens {
    pub format: TokenFormat,
    pub contents: String,
}

impl CompiledTokens {
    pub fn file_name(&self) -> String {
        format!("tokens.{}", self.format.extension())
    }
}

/// Everything a run produced, before anything is written
#[derive(Debug, Clone)]
pub struct BlendOutcome {
    pub packages: Vec<BlendedPackage>,
    pub tokens: Option<CompiledTokens>,
    pub summary: RunSummary,
}

/// Runs the per-package batch against a renderer
pub struct Blender<'a> {
    context: &'a RunContext,
    renderer: &'a dyn Renderer,
    run_id: String,
}

impl<'a> Blender<'a> {
    pub fn new(context: &'a RunContext, renderer: &'a dyn Renderer) -> Self {
        Self {
            context,
            renderer,
            run_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = run_id.into();
        self
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Blend every package and compile the tokens
    pub fn run(&self) -> BlendOutcome {
        let start = Instant::now();
        let mut blended = Vec::new();
        let mut summaries = Vec::new();

        for package in self.context.packages() {
            let package_start = Instant::now();
            match self.blend_package(package) {
                Ok(output) => {
                    let elapsed = package_start.elapsed().as_millis() as u64;
                    info!(package = %package.name, classes = output.classes.len(), "blended");
                    summaries.push(PackageSummary::success(
                        &package.name,
                        &package.version,
                        output.classes.len(),
                        elapsed,
                    ));
                    blended.push(output);
                }
                Err(failure) => {
                    let elapsed = package_start.elapsed().as_millis() as u64;
                    warn!(
                        package = %package.name,
                        kind = ?failure.kind,
                        message = %failure.message,
                        "package failed"
                    );
                    summaries.push(
                        PackageSummary::failure(
                            &package.name,
                            &package.version,
                            failure.kind,
                            failure.message,
                            elapsed,
                        )
                        .with_offending_ids(failure.ids),
                    );
                }
            }
        }

        let tokens = self.compile_tokens();

        let mut summary = RunSummary::from_package_summaries(
            self.run_id.clone(),
            summaries,
            start.elapsed().as_millis() as u64,
        );
        if let Some(ref tokens) = tokens {
            summary.push_message(format!(
                "compiled {} tokens for brand {}",
                tokens.format, self.context.brand().code
            ));
        }

        BlendOutcome {
            packages: blended,
            tokens,
            summary,
        }
    }

    /// Compile the brand tokens when the run asks for them
    pub fn compile_tokens(&self) -> Option<CompiledTokens> {
        if !self.context.wants_tokens() {
            return None;
        }

        let format = self.context.token_format();
        let flat = self.context.brand().flat_tokens();
        debug!(count = flat.len(), format = %format, "compiling tokens");

        Some(CompiledTokens {
            format,
            contents: compile_tokens(&flat, format),
        })
    }

    fn blend_package(&self, package: &PackageDescriptor) -> Result<BlendedPackage, PackageFailure> {
        let markup = match package.recipe_path() {
            Some(recipe) => self.render_package(package, recipe)?,
            None => {
                debug!(package = %package.name, "no recipe, nothing to render");
                RenderedMarkup::default()
            }
        };

        let script = match package.script_path() {
            Some(path) => Some(fs::read_to_string(&path).map_err(|e| PackageFailure {
                kind: FailureKind::Script,
                message: format!("{}: {}", path.display(), e),
                ids: Vec::new(),
            })?),
            None => None,
        };

        Ok(BlendedPackage {
            name: package.name.clone(),
            file_stem: package.file_stem().to_string(),
            version: package.version.clone(),
            is_core: package.config.is_core,
            css: markup.css,
            html: markup.html,
            classes: markup.ids,
            script,
        })
    }

    fn render_package(&self, package: &PackageDescriptor, recipe: PathBuf) -> Result<RenderedMarkup, PackageFailure> {
        let request = RenderRequest::new(recipe.to_string_lossy(), self.context.brand_object());

        let result = self.renderer.render(&request).map_err(|e| PackageFailure {
            kind: FailureKind::Worker,
            message: e.to_string(),
            ids: Vec::new(),
        })?;

        if !result.is_ok() {
            return Err(PackageFailure {
                kind: FailureKind::Render,
                message: render_error_message(&result),
                ids: Vec::new(),
            });
        }

        let check = test_labels(&result);
        if !check.is_valid() {
            return Err(PackageFailure {
                kind: FailureKind::Labels,
                message: format!("{} ids share a logical name with a different hash", check.ids.len()),
                ids: check.ids,
            });
        }

        let valid = get_valid_ids(&result.ids, result.css());
        let markup = RenderedMarkup::new(result.css(), result.html(), valid);
        Ok(convert_classes(markup, &package.version, self.context.version_mode()))
    }
}

/// Why a single package failed
#[derive(Debug)]
struct PackageFailure {
    kind: FailureKind,
    message: String,
    ids: Vec<String>,
}

fn render_error_message(result: &RenderResult) -> String {
    match result.error {
        Some(ref failure) => failure.to_string(),
        None => "renderer reported an error without details".to_string(),
    }
}

/// Run the pipeline and write its outputs
///
/// Per-package failures end up in the returned summary; only setup and
/// write errors are returned as `Err`.
pub fn blend(context: &RunContext, renderer: &dyn Renderer) -> BlendResult<RunSummary> {
    let blender = Blender::new(context, renderer);
    let outcome = blender.run();
    let mut summary = outcome.summary;

    let files = assemble(&outcome.packages, outcome.tokens.as_ref(), &context.assemble_options())?;
    let plan = context.output();
    let written = write_files(plan, &files)?;
    summary.push_message(format!("wrote {} files to {}", written.len(), plan.root.display()));

    if context.settings().get_bool("zip") {
        let archive = write_files_archive(plan, &files)?;
        summary.push_message(format!("packed {}", archive.display()));
    }

    let summary_path = plan.root.join(RUN_SUMMARY_FILE);
    fs::create_dir_all(&plan.root)
        .and_then(|_| summary.write_to_file(&summary_path))
        .map_err(|source| OutputError::Io {
            path: summary_path.clone(),
            source,
        })?;

    info!(code = summary.code, "{}", summary.human_summary);
    Ok(summary)
}
