//! Package discovery
//!
//! Candidates come from two places, in this order:
//! 1. every non-hidden directory under `<root>/<scope>/`
//! 2. the `include` setting, each entry rooted at `<root>` (may name another scope)
//!
//! Candidates are deduplicated by absolute path (first occurrence wins),
//! filtered by the `exclude` setting and by the presence of a `blender`
//! block in their manifest. Problems with a single package are logged and
//! that package is skipped; they never abort resolution.

mod exclude;

pub use exclude::ExcludeRules;

use serde::Serialize;
use std::collections::HashSet;
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Settings;
use crate::manifest::{BlenderConfig, PackageManifest};

/// Version assumed when a manifest has none
pub const UNKNOWN_VERSION: &str = "0.0.0";

/// Errors that prevent resolution as a whole
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("cannot determine working directory: {0}")]
    Io(#[from] io::Error),
}

/// A participating package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDescriptor {
    /// Absolute package directory
    pub path: PathBuf,
    /// Package name from the manifest (falls back to the scan-root-relative path)
    pub name: String,
    /// Package version from the manifest
    pub version: String,
    /// The opt-in configuration block
    pub config: BlenderConfig,
}

impl PackageDescriptor {
    /// Absolute path of the recipe module, if any
    pub fn recipe_path(&self) -> Option<PathBuf> {
        self.config.recipe.as_ref().map(|recipe| self.path.join(recipe))
    }

    /// Absolute path of the script asset, if any
    pub fn script_path(&self) -> Option<PathBuf> {
        self.config.script.as_ref().map(|script| self.path.join(script))
    }

    /// Name usable as a file stem (`@westpac/button` -> `button`)
    pub fn file_stem(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// Resolve the participating packages under `scan_root`
pub fn resolve_packages(settings: &Settings, scan_root: &Path) -> Result<Vec<PackageDescriptor>, PackageError> {
    let scan_root = absolute(scan_root)?;
    let excludes = ExcludeRules::new(&settings.get_list("exclude"));

    let mut candidates = scan_scope(&scan_root.join(settings.scope()));
    candidates.extend(include_paths(&scan_root, &settings.get_list("include")));

    let mut seen = HashSet::new();
    let mut packages = Vec::new();

    for candidate in candidates {
        if !seen.insert(candidate.clone()) {
            continue;
        }

        let relative = candidate.strip_prefix(&scan_root).unwrap_or(&candidate);
        if excludes.is_excluded(relative) {
            debug!(package = %relative.display(), "excluded");
            continue;
        }

        if let Some(package) = read_package(&candidate, relative) {
            packages.push(package);
        }
    }

    debug!(count = packages.len(), "resolved packages");
    Ok(packages)
}

/// Non-hidden directories directly under the scope directory, by name
fn scan_scope(scope_dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for entry in WalkDir::new(scope_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(scope = %scope_dir.display(), error = %err, "cannot scan scope directory");
                continue;
            }
        };

        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if entry.file_type().is_dir() && !hidden {
            found.push(entry.into_path());
        }
    }

    found
}

/// Include entries as absolute paths; missing ones are skipped with a warning
fn include_paths(scan_root: &Path, includes: &[String]) -> Vec<PathBuf> {
    includes
        .iter()
        .map(|include| include.trim())
        .filter(|include| !include.is_empty())
        .filter_map(|include| {
            let path = scan_root.join(include.trim_end_matches('/'));
            if path.is_dir() {
                Some(path)
            } else {
                warn!(package = include, "included package not found, skipping");
                None
            }
        })
        .collect()
}

fn read_package(dir: &Path, relative: &Path) -> Option<PackageDescriptor> {
    let manifest = match PackageManifest::from_dir(dir) {
        Ok(manifest) => manifest,
        Err(err) => {
            warn!(package = %relative.display(), error = %err, "cannot read package manifest, skipping");
            return None;
        }
    };

    let config = match manifest.blender_config() {
        Ok(Some(config)) => config,
        Ok(None) => {
            debug!(package = %relative.display(), "no blender block, skipping");
            return None;
        }
        Err(err) => {
            warn!(package = %relative.display(), error = %err, "invalid blender block, skipping");
            return None;
        }
    };

    Some(PackageDescriptor {
        path: dir.to_path_buf(),
        name: manifest
            .name
            .unwrap_or_else(|| relative.to_string_lossy().replace('\\', "/")),
        version: manifest.version.unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
        config,
    })
}

fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}
