//! Test fixtures: a throwaway project with a node_modules tree
//!
//! Each fixture lives in its own temporary directory:
//! - `package.json` for the project itself
//! - `node_modules/<scope>/<name>/package.json` per component package
//! - `node_modules/<brand>/tokens.json` for brands

#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use gel_blender::config::Settings;
use gel_blender::{tokenize, OptionSchema};

/// A project directory with a dependency tree
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::create_dir_all(dir.path().join("node_modules")).expect("create node_modules");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn scan_root(&self) -> PathBuf {
        self.root().join("node_modules")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join("blender")
    }

    /// Write the project's own package.json with a `blender` settings block
    pub fn with_project_settings(self, blender: Value) -> Self {
        let manifest = json!({"name": "my-site", "version": "0.0.1", "blender": blender});
        fs::write(self.manifest_path(), manifest.to_string()).expect("write project manifest");
        self
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root().join("package.json")
    }

    /// Add a component package; `blender` is its opt-in block (or `None` to opt out)
    pub fn with_package(self, name: &str, version: &str, blender: Option<Value>) -> Self {
        let dir = self.scan_root().join(name);
        fs::create_dir_all(&dir).expect("create package dir");

        let mut manifest = json!({"name": name, "version": version});
        if let Some(blender) = blender {
            manifest["blender"] = blender;
        }
        fs::write(dir.join("package.json"), manifest.to_string()).expect("write package manifest");
        self
    }

    /// Add a file inside a package
    pub fn with_package_file(self, name: &str, rel: &str, contents: &str) -> Self {
        let path = self.scan_root().join(name).join(rel);
        fs::create_dir_all(path.parent().expect("file has a parent")).expect("create dirs");
        fs::write(path, contents).expect("write package file");
        self
    }

    /// Add a brand package with a token tree
    pub fn with_brand(self, name: &str, tokens: Value) -> Self {
        let dir = self.scan_root().join(name);
        fs::create_dir_all(&dir).expect("create brand dir");
        fs::write(dir.join("package.json"), json!({"name": name}).to_string()).expect("write brand manifest");
        fs::write(dir.join("tokens.json"), tokens.to_string()).expect("write brand tokens");
        self
    }

    /// Absolute recipe path the renderer will be asked for
    pub fn recipe_path(&self, name: &str) -> String {
        self.scan_root()
            .join(name)
            .join("blender/recipe.js")
            .to_string_lossy()
            .to_string()
    }

    /// Resolve settings the way the binary does, from args plus this project's manifest
    pub fn settings(&self, args: &[&str]) -> Settings {
        let schema = OptionSchema::blender();
        let parsed = tokenize(&schema, args);
        let manifest = gel_blender::load_manifest_config(&self.manifest_path());
        Settings::resolve(&parsed, manifest, &schema)
    }
}

/// Opt-in block with the conventional recipe location
pub fn recipe_block() -> Value {
    json!({"recipe": "blender/recipe.js"})
}

/// The standard test brand
pub fn wbc_tokens() -> Value {
    json!({
        "COLORS": {"primary": "#621a4b", "hero": "#c40000"},
        "SPACING": ["2px", "4px"],
        "LAYOUT": {"breakpoints": {"sm": 576, "md": 768}}
    })
}
