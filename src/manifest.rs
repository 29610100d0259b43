//! Package manifests (package.json)
//!
//! Both the project being blended and every candidate package carry a
//! `package.json`. Its `blender` block is the opt-in configuration: for
//! component packages it names the entry points, for the project it holds
//! settings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Manifest file name inside a package directory
pub const MANIFEST_FILE: &str = "package.json";

/// Key of the opt-in configuration block
pub const BLENDER_KEY: &str = "blender";

/// Errors reading a manifest
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid blender block in {}: {message}", path.display())]
    InvalidBlenderBlock { path: PathBuf, message: String },
}

/// The opt-in configuration block of a component package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlenderConfig {
    /// Render-entry module, relative to the package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<String>,

    /// Injectable script asset, relative to the package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,

    /// Package asks for the brand tokens to be exported
    #[serde(default)]
    pub tokens: bool,

    /// Package provides the core (global) styles
    #[serde(default)]
    pub is_core: bool,
}

/// Fields of package.json the blender reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    /// Raw opt-in block
    #[serde(default)]
    pub blender: Option<Value>,

    /// Path the manifest was read from
    #[serde(skip)]
    pub path: PathBuf,

    /// SHA-256 of the raw manifest bytes
    #[serde(skip)]
    pub digest: String,
}

impl PackageManifest {
    /// Read the manifest of the package rooted at `dir`
    pub fn from_dir(dir: &Path) -> Result<Self, ManifestError> {
        Self::from_file(&dir.join(MANIFEST_FILE))
    }

    /// Read and parse a manifest file
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let bytes = fs::read(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut manifest: PackageManifest =
            serde_json::from_slice(&bytes).map_err(|source| ManifestError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        manifest.digest = hex::encode(hasher.finalize());
        manifest.path = path.to_path_buf();

        Ok(manifest)
    }

    /// The opt-in block, or `None` when it is absent or falsy.
    ///
    /// A truthy non-object block (e.g. `"blender": true`) opts in with an
    /// empty configuration.
    pub fn blender_config(&self) -> Result<Option<BlenderConfig>, ManifestError> {
        let block = match &self.blender {
            Some(block) if is_truthy(block) => block,
            _ => return Ok(None),
        };

        if !block.is_object() {
            return Ok(Some(BlenderConfig::default()));
        }

        serde_json::from_value(block.clone())
            .map(Some)
            .map_err(|e| ManifestError::InvalidBlenderBlock {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map_or(false, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_manifest(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_parse_blender_block() {
        let file = write_manifest(
            r#"{
                "name": "@westpac/button",
                "version": "1.2.0",
                "blender": {"recipe": "blender/recipe.js", "script": "blender/script.js", "isCore": false}
            }"#,
        );

        let manifest = PackageManifest::from_file(file.path()).unwrap();
        let config = manifest.blender_config().unwrap().unwrap();

        assert_eq!(manifest.name.as_deref(), Some("@westpac/button"));
        assert_eq!(manifest.version.as_deref(), Some("1.2.0"));
        assert_eq!(config.recipe.as_deref(), Some("blender/recipe.js"));
        assert_eq!(config.script.as_deref(), Some("blender/script.js"));
        assert!(!config.tokens);
        assert!(!config.is_core);
        assert_eq!(manifest.digest.len(), 64);
    }

    #[test]
    fn test_missing_block_is_none() {
        let file = write_manifest(r#"{"name": "left-pad"}"#);
        let manifest = PackageManifest::from_file(file.path()).unwrap();
        assert_eq!(manifest.blender_config().unwrap(), None);
    }

    #[test]
    fn test_falsy_block_is_none() {
        for block in ["false", "null", "0", "\"\""] {
            let file = write_manifest(&format!(r#"{{"blender": {}}}"#, block));
            let manifest = PackageManifest::from_file(file.path()).unwrap();
            assert_eq!(manifest.blender_config().unwrap(), None, "block {}", block);
        }
    }

    #[test]
    fn test_truthy_scalar_block_opts_in() {
        let file = write_manifest(r#"{"blender": true}"#);
        let manifest = PackageManifest::from_file(file.path()).unwrap();
        assert_eq!(manifest.blender_config().unwrap(), Some(BlenderConfig::default()));
    }

    #[test]
    fn test_invalid_block_is_error() {
        let file = write_manifest(r#"{"blender": {"tokens": "yes"}}"#);
        let manifest = PackageManifest::from_file(file.path()).unwrap();
        assert!(matches!(
            manifest.blender_config(),
            Err(ManifestError::InvalidBlenderBlock { .. })
        ));
    }

    #[test]
    fn test_unparseable_manifest() {
        let file = write_manifest("{ not json");
        assert!(matches!(
            PackageManifest::from_file(file.path()),
            Err(ManifestError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            PackageManifest::from_dir(dir.path()),
            Err(ManifestError::Io { .. })
        ));
    }
}
