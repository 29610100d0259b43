//! Per-run context
//!
//! Everything a blend run reads is resolved once, up front, and never
//! changes afterwards.

use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

use blender_tokens::{TokenFormat, BRAND_KEY};

use crate::brand::{Brand, BrandError};
use crate::classes::VersionMode;
use crate::config::Settings;
use crate::output::{AssembleOptions, OutputPlan, JQUERY_PATH};
use crate::packages::{resolve_packages, PackageDescriptor, PackageError};

/// Errors building a run context
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("package resolution failed: {0}")]
    Packages(#[from] PackageError),

    #[error(transparent)]
    Brand(#[from] BrandError),
}

/// Immutable inputs of one blend run
#[derive(Debug, Clone)]
pub struct RunContext {
    settings: Settings,
    scan_root: PathBuf,
    packages: Vec<PackageDescriptor>,
    brand: Brand,
    output: OutputPlan,
}

impl RunContext {
    /// Resolve packages, brand and output plan from settings
    pub fn new(settings: Settings, scan_root: &Path) -> Result<Self, ContextError> {
        let brand_name = settings.brand().ok_or(BrandError::NotSpecified)?;
        let brand = Brand::load(brand_name, scan_root)?;
        let packages = resolve_packages(&settings, scan_root)?;
        let output = OutputPlan::from_settings(&settings);

        info!(
            brand = %brand.code,
            packages = packages.len(),
            scope = settings.scope(),
            "resolved run context"
        );

        Ok(Self::from_parts(settings, scan_root, packages, brand, output))
    }

    /// Assemble a context from already-resolved parts
    pub fn from_parts(
        settings: Settings,
        scan_root: &Path,
        packages: Vec<PackageDescriptor>,
        brand: Brand,
        output: OutputPlan,
    ) -> Self {
        Self {
            settings,
            scan_root: scan_root.to_path_buf(),
            packages,
            brand,
            output,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scan_root(&self) -> &Path {
        &self.scan_root
    }

    pub fn packages(&self) -> &[PackageDescriptor] {
        &self.packages
    }

    pub fn brand(&self) -> &Brand {
        &self.brand
    }

    pub fn output(&self) -> &OutputPlan {
        &self.output
    }

    pub fn version_mode(&self) -> VersionMode {
        VersionMode::from_no_version(self.settings.get_bool("noVersionInClass"))
    }

    pub fn token_format(&self) -> TokenFormat {
        self.settings.token_format()
    }

    /// Whether a tokens file is produced this run
    pub fn wants_tokens(&self) -> bool {
        self.settings.get_str("outputTokens").is_some()
            || self.packages.iter().any(|package| package.config.tokens)
    }

    /// Brand object handed to every render: the token tree plus `BRAND`
    pub fn brand_object(&self) -> Value {
        let mut object = self.brand.tokens.clone();
        if let Value::Object(ref mut map) = object {
            map.entry(BRAND_KEY.to_string())
                .or_insert_with(|| Value::String(self.brand.code.clone()));
        }
        object
    }

    pub fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions {
            modules: self.settings.get_bool("modules"),
            prettify: self.settings.get_bool("prettify"),
            jquery: self
                .settings
                .get_bool("includeJquery")
                .then(|| self.scan_root.join(JQUERY_PATH)),
        }
    }
}
