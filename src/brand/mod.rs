//! Brand loading
//!
//! A brand is a package (usually `@westpac/<code>`) holding a `tokens.json`
//! token tree next to its `package.json`. The `brand` setting names it
//! either as a path on disk or as a package under the scan root.

use serde::Serialize;
use serde_json::Value;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use blender_tokens::{flatten_map, FlatTokenMap, BRAND_KEY};

use crate::manifest::PackageManifest;

/// Token tree file inside a brand package
pub const TOKENS_FILE: &str = "tokens.json";

/// Errors loading a brand
#[derive(Debug, thiserror::Error)]
pub enum BrandError {
    #[error("no brand specified; pass one with --brand")]
    NotSpecified,

    #[error("brand '{brand}' not found on disk or under {}", root.display())]
    NotFound { brand: String, root: PathBuf },

    #[error("failed to read brand tokens {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse brand tokens {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("brand tokens {} must be an object", path.display())]
    NotAnObject { path: PathBuf },
}

/// A loaded brand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Brand {
    /// The `brand` setting as given
    pub name: String,
    /// Short brand code, e.g. `WBC`
    pub code: String,
    /// Absolute brand directory
    pub path: PathBuf,
    /// Nested token tree, sent to the renderer as the brand object
    pub tokens: Value,
}

impl Brand {
    /// Load the brand named by `spec`, looking on disk first and then under `scan_root`
    pub fn load(spec: &str, scan_root: &Path) -> Result<Self, BrandError> {
        let path = resolve_brand_dir(spec, scan_root)?;
        let tokens_path = path.join(TOKENS_FILE);

        let bytes = fs::read(&tokens_path).map_err(|source| BrandError::Io {
            path: tokens_path.clone(),
            source,
        })?;
        let tokens: Value = serde_json::from_slice(&bytes).map_err(|source| BrandError::Parse {
            path: tokens_path.clone(),
            source,
        })?;
        if !tokens.is_object() {
            return Err(BrandError::NotAnObject { path: tokens_path });
        }

        let code = brand_code(spec, &path, &tokens);
        debug!(brand = spec, code = %code, path = %path.display(), "loaded brand");

        Ok(Self {
            name: spec.to_string(),
            code,
            path,
            tokens,
        })
    }

    /// Flattened tokens, with the brand code under `BRAND` when the tree lacks it
    pub fn flat_tokens(&self) -> FlatTokenMap {
        let mut flat = flatten_map(&self.tokens);
        if !flat.contains_key(BRAND_KEY) {
            flat.insert(BRAND_KEY.to_string(), Value::String(self.code.clone()));
        }
        flat
    }
}

/// Directory of the brand named by `spec`
pub fn resolve_brand_dir(spec: &str, scan_root: &Path) -> Result<PathBuf, BrandError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(BrandError::NotSpecified);
    }

    let direct = PathBuf::from(spec);
    let under_root = scan_root.join(spec);
    for candidate in [&direct, &under_root] {
        if candidate.is_dir() {
            return absolute(candidate).map_err(|source| BrandError::Io {
                path: candidate.clone(),
                source,
            });
        }
    }

    Err(BrandError::NotFound {
        brand: spec.to_string(),
        root: scan_root.to_path_buf(),
    })
}

/// `BRAND` from the token tree, else the last segment of the package name
fn brand_code(spec: &str, dir: &Path, tokens: &Value) -> String {
    if let Some(code) = tokens.get(BRAND_KEY).and_then(Value::as_str) {
        return code.to_string();
    }

    let name = PackageManifest::from_dir(dir)
        .ok()
        .and_then(|manifest| manifest.name)
        .unwrap_or_else(|| spec.to_string());

    name.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(&name)
        .to_uppercase()
}

fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}
