//! Project manifest settings (layer 2)

use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

use super::settings::{SettingsOrigin, SettingsSource};
use crate::manifest::PackageManifest;

pub use crate::manifest::BLENDER_KEY as MANIFEST_CONFIG_KEY;

/// Settings read from the project manifest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestConfig {
    /// The `blender` block, or empty
    pub values: Map<String, Value>,
    /// Where the values came from (None when the manifest was unusable)
    pub source: Option<SettingsSource>,
}

impl ManifestConfig {
    pub fn from_values(values: Map<String, Value>) -> Self {
        Self {
            values,
            source: None,
        }
    }
}

/// Load the `blender` block of the project manifest.
///
/// A missing or unparseable manifest is not an error: it degrades to an
/// empty configuration with an informational notice.
pub fn load_manifest_config(path: &Path) -> ManifestConfig {
    let manifest = match PackageManifest::from_file(path) {
        Ok(manifest) => manifest,
        Err(err) => {
            info!(error = %err, "no usable project manifest, continuing without manifest settings");
            return ManifestConfig::default();
        }
    };

    let source = Some(SettingsSource {
        origin: SettingsOrigin::Manifest,
        path: Some(path.to_string_lossy().to_string()),
        digest: Some(manifest.digest.clone()),
    });

    let values = match manifest.blender {
        Some(Value::Object(values)) => values,
        Some(other) => {
            info!(
                path = %path.display(),
                found = %other,
                "project manifest '{}' block is not an object, ignoring it",
                MANIFEST_CONFIG_KEY
            );
            Map::new()
        }
        None => {
            debug!(path = %path.display(), "project manifest has no '{}' block", MANIFEST_CONFIG_KEY);
            Map::new()
        }
    };

    ManifestConfig { values, source }
}
