//! Option schema for the blender command line
//!
//! One entry per flag. The schema drives tokenizing, default derivation
//! and input validation.

use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

use blender_tokens::TokenFormat;

use crate::config::{DEFAULT_OUTPUT, DEFAULT_SCOPE};
use crate::render::DEFAULT_RENDERER;

/// Declared type of an option value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Boolean,
    Array,
}

impl OptionKind {
    /// Check whether a JSON value has this kind
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            OptionKind::String => value.is_string(),
            OptionKind::Boolean => value.is_boolean(),
            OptionKind::Array => value.is_array(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::String => "string",
            OptionKind::Boolean => "boolean",
            OptionKind::Array => "array",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single option definition
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    /// Long name, kebab-case (`output-css`)
    pub name: String,
    /// One-line description for help output
    pub description: String,
    /// Declared value type
    pub kind: OptionKind,
    /// Optional single-letter alias
    pub short: Option<char>,
    /// Allowed values; empty means unrestricted
    pub allowed: Vec<String>,
    /// Default value, if any
    pub default: Option<Value>,
}

impl OptionSpec {
    pub fn new(name: &str, kind: OptionKind, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            kind,
            short: None,
            allowed: Vec::new(),
            default: None,
        }
    }

    pub fn string(name: &str, description: &str) -> Self {
        Self::new(name, OptionKind::String, description)
    }

    /// Boolean options default to `false`
    pub fn boolean(name: &str, description: &str) -> Self {
        Self::new(name, OptionKind::Boolean, description).with_default(Value::Bool(false))
    }

    pub fn array(name: &str, description: &str) -> Self {
        Self::new(name, OptionKind::Array, description)
    }

    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_allowed(mut self, allowed: &[&str]) -> Self {
        self.allowed = allowed.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Settings key for this option (`output-css` -> `outputCss`)
    pub fn key(&self) -> String {
        camel_case(&self.name)
    }
}

/// Schema construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("duplicate option name: --{0}")]
    DuplicateName(String),

    #[error("duplicate short flag: -{0}")]
    DuplicateShort(char),
}

/// Ordered, immutable set of option definitions
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSchema {
    options: Vec<OptionSpec>,
}

impl OptionSchema {
    /// Build a schema, rejecting duplicate long names and short flags
    pub fn new(options: Vec<OptionSpec>) -> Result<Self, SchemaError> {
        let mut names = HashSet::new();
        let mut shorts = HashSet::new();

        for option in &options {
            if !names.insert(option.key()) {
                return Err(SchemaError::DuplicateName(option.name.clone()));
            }
            if let Some(short) = option.short {
                if !shorts.insert(short) {
                    return Err(SchemaError::DuplicateShort(short));
                }
            }
        }

        Ok(Self { options })
    }

    /// The blender's own command-line options
    pub fn blender() -> Self {
        let formats: Vec<&str> = TokenFormat::ALL.iter().map(|f| f.as_str()).collect();

        Self {
            options: vec![
                OptionSpec::string("brand", "The brand to blend with (package name or path)")
                    .with_short('b'),
                OptionSpec::string("output", "Output directory for all blended files")
                    .with_short('o')
                    .with_default(Value::String(DEFAULT_OUTPUT.to_string())),
                OptionSpec::string("output-css", "Output directory for stylesheets"),
                OptionSpec::string("output-js", "Output directory for scripts"),
                OptionSpec::string("output-html", "Output directory for markup"),
                OptionSpec::string("output-tokens", "Output directory for design tokens"),
                OptionSpec::boolean("zip", "Also pack all files into an archive").with_short('z'),
                OptionSpec::string("scope", "Scope to scan for packages")
                    .with_short('s')
                    .with_default(Value::String(DEFAULT_SCOPE.to_string())),
                OptionSpec::array("include", "Extra packages to blend").with_short('i'),
                OptionSpec::array("exclude", "Packages to leave out").with_short('e'),
                OptionSpec::boolean("prettify", "Prettify the output").with_short('p'),
                OptionSpec::boolean("include-jquery", "Bundle jQuery with the scripts")
                    .with_short('j'),
                OptionSpec::boolean("modules", "Write one file per package").with_short('m'),
                OptionSpec::boolean(
                    "no-version-in-class",
                    "Leave the package version out of class names",
                )
                .with_short('n'),
                OptionSpec::string("tokens-format", "Format of the design tokens file")
                    .with_short('t')
                    .with_allowed(&formats)
                    .with_default(Value::String(TokenFormat::Json.as_str().to_string())),
                OptionSpec::string("renderer", "Command that runs the render worker")
                    .with_short('r')
                    .with_default(Value::String(DEFAULT_RENDERER.to_string())),
                OptionSpec::boolean("debug", "Print debug output").with_short('d'),
                OptionSpec::boolean("version", "Print the version").with_short('v'),
                OptionSpec::boolean("help", "Print this help").with_short('h'),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.iter()
    }

    /// Look up an option by its settings key
    pub fn get(&self, key: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|option| option.key() == key)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Plain-text option listing
    pub fn usage(&self) -> String {
        let mut out = String::from("Usage: blender [options]\n\nOptions:\n");
        for option in &self.options {
            let short = option
                .short
                .map(|s| format!("-{}, ", s))
                .unwrap_or_else(|| "    ".to_string());
            out.push_str(&format!(
                "  {}--{:<22} {} [{}]\n",
                short, option.name, option.description, option.kind
            ));
        }
        out
    }
}

/// Convert a kebab-case option name into its camel-cased key
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;

    for ch in name.chars() {
        if ch == '-' {
            upper = !out.is_empty();
            continue;
        }
        if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("output-css"), "outputCss");
        assert_eq!(camel_case("no-version-in-class"), "noVersionInClass");
        assert_eq!(camel_case("brand"), "brand");
        assert_eq!(camel_case("flag-for-b"), "flagForB");
    }

    #[test]
    fn test_blender_schema_is_valid() {
        let schema = OptionSchema::blender();
        let checked = OptionSchema::new(schema.iter().cloned().collect());
        assert_eq!(checked, Ok(schema));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = OptionSchema::new(vec![
            OptionSpec::string("brand", "a"),
            OptionSpec::boolean("brand", "b"),
        ]);
        assert_eq!(result, Err(SchemaError::DuplicateName("brand".to_string())));
    }

    #[test]
    fn test_duplicate_short_rejected() {
        let result = OptionSchema::new(vec![
            OptionSpec::string("brand", "a").with_short('b'),
            OptionSpec::boolean("bundle", "b").with_short('b'),
        ]);
        assert_eq!(result, Err(SchemaError::DuplicateShort('b')));
    }

    #[test]
    fn test_tokens_format_enumeration() {
        let schema = OptionSchema::blender();
        let option = schema.get("tokensFormat").unwrap();

        assert_eq!(option.allowed, vec!["json", "less", "sass", "scss", "css"]);
        assert_eq!(option.default, Some(Value::String("json".to_string())));
    }

    #[test]
    fn test_kind_matches() {
        assert!(OptionKind::Array.matches(&serde_json::json!(["a"])));
        assert!(!OptionKind::Array.matches(&serde_json::json!("a")));
        assert!(OptionKind::Boolean.matches(&serde_json::json!(true)));
        assert!(OptionKind::String.matches(&serde_json::json!("a")));
    }

    #[test]
    fn test_usage_lists_every_option() {
        let schema = OptionSchema::blender();
        let usage = schema.usage();
        for option in schema.iter() {
            assert!(usage.contains(&format!("--{}", option.name)));
        }
    }
}
