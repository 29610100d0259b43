//! Resolved settings with provenance
//!
//! Settings are created once per run, after argument parsing, and are
//! read-only from then on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

use blender_tokens::TokenFormat;

use super::defaults::schema_defaults;
use super::manifest::ManifestConfig;
use super::merge::merge_layers;
use crate::cli::{OptionSchema, ParsedArguments};

/// Scope scanned when none is configured
pub const DEFAULT_SCOPE: &str = "@westpac";

/// Output directory used when none is configured
pub const DEFAULT_OUTPUT: &str = "blender";

/// Origin of a settings layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SettingsOrigin {
    Defaults,
    Manifest,
    Cli,
}

/// A contributing settings layer with provenance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsSource {
    pub origin: SettingsOrigin,

    /// File path (None for defaults/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (None for defaults/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl SettingsSource {
    fn inline(origin: SettingsOrigin) -> Self {
        Self {
            origin,
            path: None,
            digest: None,
        }
    }
}

/// Immutable, flat settings for one run
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    values: Map<String, Value>,
    sources: Vec<SettingsSource>,
    /// Command-line values that had no flag to attach to
    #[serde(skip_serializing_if = "Vec::is_empty")]
    orphans: Vec<String>,
    created_at: DateTime<Utc>,
}

impl Settings {
    /// Merge `defaults ⊂ manifest ⊂ cli`, each key replaced wholesale.
    pub fn resolve(parsed: &ParsedArguments, manifest: ManifestConfig, schema: &OptionSchema) -> Self {
        let mut sources = vec![SettingsSource::inline(SettingsOrigin::Defaults)];
        if let Some(source) = manifest.source {
            sources.push(source);
        }
        sources.push(SettingsSource::inline(SettingsOrigin::Cli));

        let values = merge_layers(vec![
            schema_defaults(schema),
            manifest.values,
            parsed.to_map(),
        ]);

        Self {
            values,
            sources,
            orphans: parsed.orphans.clone(),
            created_at: Utc::now(),
        }
    }

    /// Settings from an explicit map, without layering
    pub fn from_values(values: Map<String, Value>) -> Self {
        Self {
            values,
            sources: vec![SettingsSource::inline(SettingsOrigin::Cli)],
            orphans: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn sources(&self) -> &[SettingsSource] {
        &self.sources
    }

    pub fn orphans(&self) -> &[String] {
        &self.orphans
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    /// Boolean setting; anything but `true` reads as false
    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
    }

    /// A string or list setting normalized to a list of strings
    pub fn get_list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::String(value)) => vec![value.clone()],
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn scope(&self) -> &str {
        self.get_str("scope").unwrap_or(DEFAULT_SCOPE)
    }

    pub fn brand(&self) -> Option<&str> {
        self.get_str("brand")
    }

    pub fn output(&self) -> PathBuf {
        PathBuf::from(self.get_str("output").unwrap_or(DEFAULT_OUTPUT))
    }

    /// Token format; unknown names fall back to json (check_input reports them)
    pub fn token_format(&self) -> TokenFormat {
        self.get_str("tokensFormat")
            .and_then(|name| name.parse().ok())
            .unwrap_or_default()
    }

    pub fn debug(&self) -> bool {
        self.get_bool("debug")
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
