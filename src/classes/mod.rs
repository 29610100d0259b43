//! Identity rewriting
//!
//! Renderer identifiers have the shape `<hash>-<component>[-<rest>]` and
//! appear in output as `css-<id>`. They are rewritten into stable names:
//! `GEL-<component>[-v<version>][-<rest>]`, with dots in the version
//! replaced by underscores. The hash is discarded.

mod matcher;

pub use matcher::{contains_token, find_token, machine_token, replace_token, MACHINE_PREFIX};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use blender_protocol::RenderResult;

/// Prefix of every human-readable class
pub const CLASS_PREFIX: &str = "GEL";

/// Whether generated classes carry the package version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionMode {
    #[default]
    Versioned,
    Unversioned,
}

impl VersionMode {
    /// Mode for the `noVersionInClass` setting
    pub fn from_no_version(no_version: bool) -> Self {
        if no_version {
            VersionMode::Unversioned
        } else {
            VersionMode::Versioned
        }
    }
}

/// Rendered styles and markup for one package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMarkup {
    pub css: String,
    pub html: String,
    pub ids: Vec<String>,
}

impl RenderedMarkup {
    pub fn new(css: impl Into<String>, html: impl Into<String>, ids: Vec<String>) -> Self {
        Self {
            css: css.into(),
            html: html.into(),
            ids,
        }
    }
}

impl From<&RenderResult> for RenderedMarkup {
    fn from(result: &RenderResult) -> Self {
        Self::new(result.css(), result.html(), result.ids.clone())
    }
}

/// The human-readable class for one identifier
pub fn class_name(id: &str, version: &str, mode: VersionMode) -> String {
    let logical = id.split_once('-').map_or(id, |(_, logical)| logical);
    let (component, rest) = match logical.split_once('-') {
        Some((component, rest)) => (component, Some(rest)),
        None => (logical, None),
    };

    let mut class = format!("{}-{}", CLASS_PREFIX, component);
    if mode == VersionMode::Versioned {
        class.push_str("-v");
        class.push_str(&version.replace('.', "_"));
    }
    if let Some(rest) = rest {
        class.push('-');
        class.push_str(rest);
    }
    class
}

/// Rewrite every machine-generated class in css and html
pub fn convert_classes(markup: RenderedMarkup, version: &str, mode: VersionMode) -> RenderedMarkup {
    let RenderedMarkup { mut css, mut html, ids } = markup;

    let mut seen = HashSet::new();
    let mut classes = Vec::new();

    for id in ids {
        if !seen.insert(id.clone()) {
            continue;
        }

        let token = machine_token(&id);
        let class = class_name(&id, version, mode);
        css = replace_token(&css, &token, &class);
        html = replace_token(&html, &token, &class);

        if !classes.contains(&class) {
            classes.push(class);
        }
    }

    RenderedMarkup { css, html, ids: classes }
}
