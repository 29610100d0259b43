//! Label validation
//!
//! Every identifier a render declares has the shape `<hash>-<logicalName>`.
//! Within one package a logical name must map to exactly one hash; two
//! hashes for the same name means two different style sets would end up
//! under the same human-readable class.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use blender_protocol::RenderResult;

use crate::classes::{contains_token, machine_token};

/// Outcome of a label check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCheck {
    /// 0 when valid, 1 when at least one logical name collides
    pub code: u8,
    /// Offending identifiers, in input order
    pub ids: Vec<String>,
}

impl LabelCheck {
    pub fn is_valid(&self) -> bool {
        self.code == 0
    }
}

/// Split an identifier into `(hash, logical name)`
///
/// An identifier without a dash is its own logical name.
pub fn split_id(id: &str) -> (&str, &str) {
    id.split_once('-').unwrap_or(("", id))
}

/// Find logical names claimed by more than one hash
pub fn check_ids<S: AsRef<str>>(ids: &[S]) -> LabelCheck {
    let mut hashes: HashMap<&str, HashSet<&str>> = HashMap::new();
    for id in ids {
        let (hash, logical) = split_id(id.as_ref());
        hashes.entry(logical).or_default().insert(hash);
    }

    let mut seen = HashSet::new();
    let offending: Vec<String> = ids
        .iter()
        .map(AsRef::as_ref)
        .filter(|id| hashes.get(split_id(id).1).is_some_and(|set| set.len() > 1))
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect();

    LabelCheck {
        code: u8::from(!offending.is_empty()),
        ids: offending,
    }
}

/// Declared identifiers that actually appear in the stylesheet as `css-<id>`
pub fn get_valid_ids<S: AsRef<str>>(ids: &[S], css: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut valid = Vec::new();

    for id in ids.iter().map(AsRef::as_ref) {
        if !seen.insert(id) {
            continue;
        }
        if contains_token(css, &machine_token(id)) {
            valid.push(id.to_string());
        } else {
            debug!(id, "declared id not emitted in css, dropping");
        }
    }

    valid
}

/// Check the identifiers a render actually emitted
pub fn test_labels(result: &RenderResult) -> LabelCheck {
    check_ids(&get_valid_ids(&result.ids, result.css()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_names_pass() {
        let check = check_ids(&["hash1-one", "hash2-two", "hash1-one"]);
        assert_eq!(check, LabelCheck::default());
        assert!(check.is_valid());
    }

    #[test]
    fn test_collision_reported() {
        let check = check_ids(&["hash1-one", "hash2-two", "hash3-two"]);
        assert_eq!(check.code, 1);
        assert_eq!(check.ids, vec!["hash2-two", "hash3-two"]);
    }

    #[test]
    fn test_collision_dedup_keeps_input_order() {
        let check = check_ids(&["b-x", "a-x", "b-x", "c-y"]);
        assert_eq!(check.ids, vec!["b-x", "a-x"]);
    }

    #[test]
    fn test_logical_name_keeps_inner_dashes() {
        assert_eq!(split_id("zje891-component1-look1"), ("zje891", "component1-look1"));
        assert!(check_ids(&["a-btn-large", "b-btn-small"]).is_valid());
        assert!(!check_ids(&["a-btn-large", "b-btn-large"]).is_valid());
    }

    #[test]
    fn test_empty_input() {
        assert!(check_ids::<&str>(&[]).is_valid());
    }

    #[test]
    fn test_valid_ids_need_exact_token() {
        let css = ".css-h1-a{}.css-h2-b-c{}";
        let valid = get_valid_ids(&["h1-a", "h2-b", "h2-b-c", "h9-z", "h1-a"], css);
        assert_eq!(valid, vec!["h1-a", "h2-b-c"]);
    }

    #[test]
    fn test_labels_ignore_undeclared_collisions() {
        // h3-two is declared but never emitted, so it cannot collide
        let result = RenderResult::ok(
            "",
            ".css-h1-one{}.css-h2-two{}",
            vec!["h1-one".into(), "h2-two".into(), "h3-two".into()],
        );
        assert!(test_labels(&result).is_valid());
    }

    #[test]
    fn test_labels_report_emitted_collisions() {
        let result = RenderResult::ok(
            "",
            ".css-h2-two{}.css-h3-two{}",
            vec!["h2-two".into(), "h3-two".into()],
        );
        let check = test_labels(&result);
        assert_eq!(check.code, 1);
        assert_eq!(check.ids, vec!["h2-two", "h3-two"]);
    }
}
