//! GEL Blender - brand-specific bundles from design-system packages
//!
//! This crate scans a dependency tree for component packages that opt in
//! through their manifest, renders each one under a brand, rewrites the
//! generated style identifiers into stable human-readable classes and
//! compiles the brand's design tokens.

pub mod brand;
pub mod classes;
pub mod cli;
pub mod config;
pub mod context;
pub mod labels;
pub mod manifest;
pub mod output;
pub mod packages;
pub mod pipeline;
pub mod render;
pub mod summary;

pub use brand::{Brand, BrandError};
pub use classes::{class_name, convert_classes, RenderedMarkup, VersionMode};
pub use cli::{tokenize, OptionSchema, ParsedArguments};
pub use config::{check_input, load_manifest_config, InputCheck, Settings};
pub use context::{ContextError, RunContext};
pub use labels::{check_ids, get_valid_ids, test_labels, LabelCheck};
pub use packages::{resolve_packages, PackageDescriptor};
pub use pipeline::{blend, BlendError, BlendOutcome, Blender};
pub use render::{MockRenderer, ProcessRenderer, RenderError, Renderer, RendererCommand};
pub use summary::{ExitCode, RunSummary};

pub use blender_protocol::{RenderRequest, RenderResult};
pub use blender_tokens::{compile_tokens, flatten_tokens, TokenFormat};
