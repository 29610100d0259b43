//! Settings resolution
//!
//! Settings are layered, later layers replacing earlier ones key by key:
//! 1. Option schema defaults
//! 2. The `blender` block of the project manifest (package.json)
//! 3. Command-line arguments

mod check;
mod defaults;
mod manifest;
mod merge;
mod settings;

pub use check::{check_input, InputCheck};
pub use defaults::schema_defaults;
pub use manifest::{load_manifest_config, ManifestConfig, MANIFEST_CONFIG_KEY};
pub use merge::{merge_layers, shallow_merge};
pub use settings::{Settings, SettingsOrigin, SettingsSource, DEFAULT_OUTPUT, DEFAULT_SCOPE};
