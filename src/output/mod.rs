//! Output writing
//!
//! Blended files land in one directory per category. Each category directory
//! defaults to a subdirectory of the `output` setting and can be overridden
//! on its own (`outputCss`, `outputJs`, `outputHtml`, `outputTokens`).

mod archive;
mod assemble;
mod prettify;

pub use archive::{archive_bytes, write_archive, ARCHIVE_FILE};
pub use assemble::{assemble, AssembleOptions, COMBINED_SCRIPT, COMBINED_STYLE, JQUERY_PATH};
pub use prettify::prettify_css;

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Settings;

/// Output errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read jQuery from {}: {source}", path.display())]
    Jquery {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Kind of blended file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Css,
    Js,
    Html,
    Tokens,
}

impl Category {
    /// Default subdirectory of the output directory
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Css => "css",
            Category::Js => "js",
            Category::Html => "docs",
            Category::Tokens => "tokens",
        }
    }

    /// Setting that overrides this category's directory
    pub fn setting_key(&self) -> &'static str {
        match self {
            Category::Css => "outputCss",
            Category::Js => "outputJs",
            Category::Html => "outputHtml",
            Category::Tokens => "outputTokens",
        }
    }
}

/// A file ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub category: Category,
    pub name: String,
    pub contents: String,
}

impl OutputFile {
    pub fn new(category: Category, name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Location inside the archive (`css/gel.min.css`), independent of overrides
    pub fn archive_path(&self) -> String {
        format!("{}/{}", self.category.dir_name(), self.name)
    }
}

/// Resolved output directories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPlan {
    pub root: PathBuf,
    pub css: PathBuf,
    pub js: PathBuf,
    pub html: PathBuf,
    pub tokens: PathBuf,
}

impl OutputPlan {
    pub fn from_settings(settings: &Settings) -> Self {
        let root = settings.output();
        let dir = |category: Category| {
            settings
                .get_str(category.setting_key())
                .map(PathBuf::from)
                .unwrap_or_else(|| root.join(category.dir_name()))
        };

        Self {
            css: dir(Category::Css),
            js: dir(Category::Js),
            html: dir(Category::Html),
            tokens: dir(Category::Tokens),
            root,
        }
    }

    pub fn dir(&self, category: Category) -> &Path {
        match category {
            Category::Css => &self.css,
            Category::Js => &self.js,
            Category::Html => &self.html,
            Category::Tokens => &self.tokens,
        }
    }

    pub fn path_of(&self, file: &OutputFile) -> PathBuf {
        self.dir(file.category).join(&file.name)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.root.join(ARCHIVE_FILE)
    }
}

/// Write every file, creating directories as needed
pub fn write_files(plan: &OutputPlan, files: &[OutputFile]) -> Result<Vec<PathBuf>, OutputError> {
    let mut written = Vec::with_capacity(files.len());

    for file in files {
        let path = plan.path_of(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| OutputError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &file.contents).map_err(|source| OutputError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = file.contents.len(), "wrote");
        written.push(path);
    }

    Ok(written)
}

/// Pack the files into the plan's archive; returns the archive path
pub fn write_files_archive(plan: &OutputPlan, files: &[OutputFile]) -> Result<PathBuf, OutputError> {
    let entries: BTreeMap<String, Vec<u8>> = files
        .iter()
        .map(|file| (file.archive_path(), file.contents.clone().into_bytes()))
        .collect();

    let path = plan.archive_path();
    let io_err = |source| OutputError::Io {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(&plan.root).map_err(io_err)?;
    let digest = write_archive(&entries, &path).map_err(io_err)?;
    debug!(path = %path.display(), sha256 = %digest, "wrote archive");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(value: serde_json::Value) -> Settings {
        Settings::from_values(value.as_object().cloned().unwrap())
    }

    #[test]
    fn test_plan_defaults() {
        let plan = OutputPlan::from_settings(&settings(json!({"output": "dist"})));

        assert_eq!(plan.css, PathBuf::from("dist/css"));
        assert_eq!(plan.js, PathBuf::from("dist/js"));
        assert_eq!(plan.html, PathBuf::from("dist/docs"));
        assert_eq!(plan.tokens, PathBuf::from("dist/tokens"));
    }

    #[test]
    fn test_plan_overrides() {
        let plan = OutputPlan::from_settings(&settings(json!({
            "output": "dist",
            "outputCss": "public/styles",
            "outputTokens": "src/tokens"
        })));

        assert_eq!(plan.css, PathBuf::from("public/styles"));
        assert_eq!(plan.tokens, PathBuf::from("src/tokens"));
        assert_eq!(plan.js, PathBuf::from("dist/js"));
        assert_eq!(plan.archive_path(), PathBuf::from("dist").join(ARCHIVE_FILE));
    }

    #[test]
    fn test_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let plan = OutputPlan::from_settings(&settings(json!({"output": out.to_str().unwrap()})));

        let files = vec![
            OutputFile::new(Category::Css, "gel.min.css", ".GEL-a{}"),
            OutputFile::new(Category::Html, "button.html", "<button></button>"),
        ];
        let written = write_files(&plan, &files).unwrap();

        assert_eq!(written, vec![out.join("css/gel.min.css"), out.join("docs/button.html")]);
        assert_eq!(fs::read_to_string(out.join("css/gel.min.css")).unwrap(), ".GEL-a{}");
    }

    #[test]
    fn test_archive_ignores_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let plan = OutputPlan::from_settings(&settings(json!({
            "output": dir.path().join("a").to_str().unwrap(),
            "outputCss": dir.path().join("elsewhere").to_str().unwrap()
        })));
        let other = OutputPlan::from_settings(&settings(json!({
            "output": dir.path().join("b").to_str().unwrap()
        })));
        let files = vec![OutputFile::new(Category::Css, "gel.min.css", ".GEL-a{}")];

        let first = write_files_archive(&plan, &files).unwrap();
        let second = write_files_archive(&other, &files).unwrap();

        assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
    }
}
