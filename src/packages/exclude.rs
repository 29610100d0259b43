//! Exclusion rules for package resolution
//!
//! Exclude entries are paths relative to the scan root (`@westpac/core`).
//! Each entry is compiled as a glob, so a plain path matches exactly and
//! `@westpac/*-legacy` matches a family of packages.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

/// Compiled exclude list
#[derive(Debug)]
pub struct ExcludeRules {
    glob_set: GlobSet,
    /// Entries that are not valid globs, matched exactly
    literals: HashSet<String>,
    len: usize,
}

impl ExcludeRules {
    /// Compile exclude entries; empty entries are ignored
    ///
    /// An entry that is not a valid glob is logged and kept as an exact
    /// path match.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut literals = HashSet::new();
        let mut len = 0;

        for pattern in patterns {
            let pattern = normalize(pattern.as_ref());
            if pattern.is_empty() {
                continue;
            }
            match GlobBuilder::new(pattern).literal_separator(true).build() {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => {
                    warn!(pattern, error = %e, "invalid exclude pattern, matching it literally");
                    literals.insert(pattern.to_string());
                }
            }
            len += 1;
        }

        let glob_set = builder.build().unwrap_or_else(|e| {
            warn!(error = %e, "cannot compile exclude patterns, only literal entries apply");
            GlobSet::empty()
        });

        Self {
            glob_set,
            literals,
            len,
        }
    }

    /// Check if a path relative to the scan root is excluded
    pub fn is_excluded(&self, relative: &Path) -> bool {
        let path_str = relative.to_string_lossy().replace('\\', "/");
        self.literals.contains(&path_str) || self.glob_set.is_match(path_str.as_str())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn normalize(pattern: &str) -> &str {
    let pattern = pattern.trim();
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    pattern.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_path() {
        let rules = ExcludeRules::new(&["@westpac/core"]);

        assert!(rules.is_excluded(Path::new("@westpac/core")));
        assert!(!rules.is_excluded(Path::new("@westpac/core-extra")));
        assert!(!rules.is_excluded(Path::new("@westpac/button")));
    }

    #[test]
    fn test_trailing_slash_and_dot_prefix() {
        let rules = ExcludeRules::new(&["./@westpac/core/", " @westpac/grid "]);

        assert!(rules.is_excluded(Path::new("@westpac/core")));
        assert!(rules.is_excluded(Path::new("@westpac/grid")));
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn test_glob_pattern() {
        let rules = ExcludeRules::new(&["@westpac/*-legacy"]);

        assert!(rules.is_excluded(Path::new("@westpac/button-legacy")));
        assert!(!rules.is_excluded(Path::new("@westpac/button")));
        assert!(!rules.is_excluded(Path::new("@westpac/nested/x-legacy")));
    }

    #[test]
    fn test_cross_scope() {
        let rules = ExcludeRules::new(&["@other/widget"]);
        assert!(rules.is_excluded(Path::new("@other/widget")));
        assert!(!rules.is_excluded(Path::new("@westpac/widget")));
    }

    #[test]
    fn test_empty_rules() {
        let rules = ExcludeRules::new::<&str>(&[]);
        assert!(rules.is_empty());
        assert!(!rules.is_excluded(Path::new("@westpac/core")));
    }

    #[test]
    fn test_invalid_pattern_matches_literally() {
        let rules = ExcludeRules::new(&["@westpac/[core", "@westpac/*-legacy"]);

        assert_eq!(rules.len(), 2);
        assert!(rules.is_excluded(Path::new("@westpac/[core")));
        assert!(!rules.is_excluded(Path::new("@westpac/core")));
        assert!(rules.is_excluded(Path::new("@westpac/grid-legacy")));
    }
}
