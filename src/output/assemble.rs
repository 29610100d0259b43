//! Turning blended packages into output files

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use super::prettify::prettify_css;
use super::{Category, OutputError, OutputFile};
use crate::pipeline::{BlendedPackage, CompiledTokens};

/// Combined stylesheet name
pub const COMBINED_STYLE: &str = "gel.min.css";

/// Combined script name
pub const COMBINED_SCRIPT: &str = "gel.min.js";

/// jQuery location relative to the scan root
pub const JQUERY_PATH: &str = "jquery/dist/jquery.min.js";

/// How blended packages are laid out on disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembleOptions {
    /// One file per package instead of combined files
    pub modules: bool,
    /// One css declaration per line
    pub prettify: bool,
    /// jQuery source prepended to the combined script
    pub jquery: Option<PathBuf>,
}

/// Build the output files for a run
///
/// Styles put core packages first. Packages that produced no css, markup or
/// script contribute no file for that category. Packages whose bare names
/// clash (`@westpac/button`, `@other/button`) get scoped file stems
/// (`westpac-button`, `other-button`).
pub fn assemble(
    packages: &[BlendedPackage],
    tokens: Option<&CompiledTokens>,
    options: &AssembleOptions,
) -> Result<Vec<OutputFile>, OutputError> {
    let mut files = Vec::new();
    let stems = file_stems(packages);

    let mut ordered: Vec<&BlendedPackage> = packages.iter().collect();
    ordered.sort_by_key(|package| !package.is_core);

    let style = |css: &str| {
        if options.prettify {
            prettify_css(css)
        } else {
            css.to_string()
        }
    };

    if options.modules {
        for package in ordered.iter().filter(|p| !p.css.is_empty()) {
            files.push(OutputFile::new(
                Category::Css,
                format!("{}.min.css", stem_of(&stems, package)),
                style(&package.css),
            ));
        }
    } else {
        let combined: Vec<&str> = ordered
            .iter()
            .map(|p| p.css.as_str())
            .filter(|css| !css.is_empty())
            .collect();
        if !combined.is_empty() {
            files.push(OutputFile::new(Category::Css, COMBINED_STYLE, style(&combined.join("\n"))));
        }
    }

    for package in packages.iter().filter(|p| !p.html.is_empty()) {
        files.push(OutputFile::new(
            Category::Html,
            format!("{}.html", stem_of(&stems, package)),
            package.html.clone(),
        ));
    }

    let scripts: Vec<(&BlendedPackage, &str)> = packages
        .iter()
        .filter_map(|p| p.script.as_deref().map(|script| (p, script)))
        .collect();

    let jquery = match options.jquery {
        Some(ref path) => Some(fs::read_to_string(path).map_err(|source| OutputError::Jquery {
            path: path.clone(),
            source,
        })?),
        None => None,
    };

    if options.modules {
        if let Some(jquery) = jquery {
            files.push(OutputFile::new(Category::Js, "jquery.min.js", jquery));
        }
        for (package, script) in scripts {
            files.push(OutputFile::new(
                Category::Js,
                format!("{}.min.js", stem_of(&stems, package)),
                script,
            ));
        }
    } else {
        let combined: Vec<&str> = jquery
            .as_deref()
            .into_iter()
            .chain(scripts.iter().map(|(_, script)| *script))
            .collect();
        if !combined.is_empty() {
            files.push(OutputFile::new(Category::Js, COMBINED_SCRIPT, combined.join("\n")));
        }
    }

    if let Some(tokens) = tokens {
        files.push(OutputFile::new(Category::Tokens, tokens.file_name(), tokens.contents.clone()));
    }

    Ok(files)
}

/// Package name -> output file stem, scoped wherever bare stems collide
fn file_stems(packages: &[BlendedPackage]) -> HashMap<&str, String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for package in packages {
        *counts.entry(package.file_stem.as_str()).or_default() += 1;
    }

    packages
        .iter()
        .map(|package| {
            let stem = if counts.get(package.file_stem.as_str()).copied().unwrap_or(0) > 1 {
                let scoped = scoped_stem(&package.name);
                debug!(package = %package.name, stem = %scoped, "file name clash, using scoped stem");
                scoped
            } else {
                package.file_stem.clone()
            };
            (package.name.as_str(), stem)
        })
        .collect()
}

fn stem_of<'a>(stems: &'a HashMap<&str, String>, package: &'a BlendedPackage) -> &'a str {
    stems
        .get(package.name.as_str())
        .map(String::as_str)
        .unwrap_or(package.file_stem.as_str())
}

fn scoped_stem(name: &str) -> String {
    name.trim_start_matches('@').replace('/', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use blender_tokens::TokenFormat;

    fn package(stem: &str, css: &str, html: &str, script: Option<&str>, is_core: bool) -> BlendedPackage {
        scoped_package("@westpac", stem, css, html, script, is_core)
    }

    fn scoped_package(
        scope: &str,
        stem: &str,
        css: &str,
        html: &str,
        script: Option<&str>,
        is_core: bool,
    ) -> BlendedPackage {
        BlendedPackage {
            name: format!("{}/{}", scope, stem),
            file_stem: stem.to_string(),
            version: "1.0.0".to_string(),
            is_core,
            css: css.to_string(),
            html: html.to_string(),
            classes: Vec::new(),
            script: script.map(str::to_string),
        }
    }

    fn names(files: &[OutputFile]) -> Vec<String> {
        files.iter().map(OutputFile::archive_path).collect()
    }

    #[test]
    fn test_combined_core_first() {
        let packages = vec![
            package("button", ".GEL-btn{}", "<button></button>", Some("btn()"), false),
            package("core", ".GEL-core{}", "", None, true),
        ];

        let files = assemble(&packages, None, &AssembleOptions::default()).unwrap();

        assert_eq!(names(&files), vec!["css/gel.min.css", "docs/button.html", "js/gel.min.js"]);
        assert_eq!(files[0].contents, ".GEL-core{}\n.GEL-btn{}");
        assert_eq!(files[2].contents, "btn()");
    }

    #[test]
    fn test_modules() {
        let packages = vec![
            package("button", ".GEL-btn{}", "", Some("btn()"), false),
            package("grid", "", "", Some("grid()"), false),
        ];
        let options = AssembleOptions {
            modules: true,
            ..Default::default()
        };

        let files = assemble(&packages, None, &options).unwrap();

        assert_eq!(names(&files), vec!["css/button.min.css", "js/button.min.js", "js/grid.min.js"]);
    }

    #[test]
    fn test_clashing_names_get_scoped_stems() {
        let packages = vec![
            package("button", ".W{}", "W", Some("w()"), false),
            scoped_package("@other", "button", ".O{}", "O", Some("o()"), false),
            package("grid", ".G{}", "G", None, false),
        ];
        let options = AssembleOptions {
            modules: true,
            ..Default::default()
        };

        let files = assemble(&packages, None, &options).unwrap();

        assert_eq!(
            names(&files),
            vec![
                "css/westpac-button.min.css",
                "css/other-button.min.css",
                "css/grid.min.css",
                "docs/westpac-button.html",
                "docs/other-button.html",
                "docs/grid.html",
                "js/westpac-button.min.js",
                "js/other-button.min.js",
            ]
        );
        assert_eq!(files[3].contents, "W");
        assert_eq!(files[4].contents, "O");
    }

    #[test]
    fn test_prettify_applies_to_css_only() {
        let packages = vec![package("button", ".a{b:c;d:e}", "<p>x</p>", None, false)];
        let options = AssembleOptions {
            prettify: true,
            ..Default::default()
        };

        let files = assemble(&packages, None, &options).unwrap();

        assert_eq!(files[0].contents, ".a {\n  b:c;\n  d:e\n}\n");
        assert_eq!(files[1].contents, "<p>x</p>");
    }

    #[test]
    fn test_jquery_prepended() {
        let dir = tempfile::tempdir().unwrap();
        let jquery = dir.path().join("jquery.min.js");
        fs::write(&jquery, "jQuery()").unwrap();

        let packages = vec![package("button", "", "", Some("btn()"), false)];
        let options = AssembleOptions {
            jquery: Some(jquery),
            ..Default::default()
        };

        let files = assemble(&packages, None, &options).unwrap();
        assert_eq!(files[0].contents, "jQuery()\nbtn()");
    }

    #[test]
    fn test_missing_jquery_is_error() {
        let options = AssembleOptions {
            jquery: Some(PathBuf::from("/nonexistent/jquery.min.js")),
            ..Default::default()
        };
        assert!(matches!(assemble(&[], None, &options), Err(OutputError::Jquery { .. })));
    }

    #[test]
    fn test_tokens_file() {
        let tokens = CompiledTokens {
            format: TokenFormat::Scss,
            contents: "$BRAND: \"WBC\";\n".to_string(),
        };

        let files = assemble(&[], Some(&tokens), &AssembleOptions::default()).unwrap();

        assert_eq!(names(&files), vec!["tokens/tokens.scss"]);
    }
}
