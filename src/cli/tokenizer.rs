//! Schema-driven argument tokenizer
//!
//! Turns a raw flag/value stream into a flat option map:
//! - `--name` or a two-character `-x` sets the current flag to `true`
//! - `-abc` sets every flag in the cluster; the last one becomes current
//! - any other token is a value for the current flag
//!
//! Unknown flags are kept under their literal token text so that the
//! settings check can report them.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

use super::schema::{OptionKind, OptionSchema};

/// Value collected for a flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Flag(bool),
    Value(String),
    List(Vec<String>),
}

impl ArgValue {
    /// Attach another value token
    fn push(&mut self, value: String, kind: Option<OptionKind>) {
        let next = match std::mem::replace(self, ArgValue::Flag(true)) {
            ArgValue::Flag(_) if kind == Some(OptionKind::Array) => ArgValue::List(vec![value]),
            ArgValue::Flag(_) => ArgValue::Value(value),
            ArgValue::Value(first) => ArgValue::List(vec![first, value]),
            ArgValue::List(mut values) => {
                values.push(value);
                ArgValue::List(values)
            }
        };
        *self = next;
    }

    pub fn to_value(&self) -> Value {
        match self {
            ArgValue::Flag(flag) => Value::Bool(*flag),
            ArgValue::Value(value) => Value::String(value.clone()),
            ArgValue::List(values) => {
                Value::Array(values.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// Tokenized command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArguments {
    /// Option key -> collected value
    pub values: BTreeMap<String, ArgValue>,
    /// Value tokens that had no flag to attach to
    pub orphans: Vec<String>,
}

impl ParsedArguments {
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.values.get(key)
    }

    pub fn is_set(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(ArgValue::Flag(true)))
    }

    /// Convert to a JSON object for layering
    pub fn to_map(&self) -> Map<String, Value> {
        self.values
            .iter()
            .map(|(key, value)| (key.clone(), value.to_value()))
            .collect()
    }
}

/// Flag spelling -> option key lookup, built once per schema
struct FlagDictionary {
    long: HashMap<String, String>,
    short: HashMap<char, String>,
    kinds: HashMap<String, OptionKind>,
}

impl FlagDictionary {
    fn new(schema: &OptionSchema) -> Self {
        let mut long = HashMap::new();
        let mut short = HashMap::new();
        let mut kinds = HashMap::new();

        for option in schema.iter() {
            let key = option.key();
            long.insert(format!("--{}", option.name), key.clone());
            if let Some(letter) = option.short {
                short.insert(letter, key.clone());
            }
            kinds.insert(key, option.kind);
        }

        Self { long, short, kinds }
    }

    fn resolve(&self, token: &str) -> String {
        if let Some(key) = self.long.get(token) {
            return key.clone();
        }
        let mut chars = token.chars();
        if let (Some('-'), Some(letter), None) = (chars.next(), chars.next(), chars.next()) {
            if let Some(key) = self.short.get(&letter) {
                return key.clone();
            }
        }
        token.to_string()
    }

    fn resolve_short(&self, letter: char) -> String {
        self.short
            .get(&letter)
            .cloned()
            .unwrap_or_else(|| format!("-{}", letter))
    }

    fn kind(&self, key: &str) -> Option<OptionKind> {
        self.kinds.get(key).copied()
    }
}

/// Tokenize command-line arguments (program name already stripped)
pub fn tokenize<S: AsRef<str>>(schema: &OptionSchema, args: &[S]) -> ParsedArguments {
    let flags = FlagDictionary::new(schema);
    let mut parsed = ParsedArguments::default();
    let mut current: Option<String> = None;

    for arg in args {
        let token = arg.as_ref();
        let length = token.chars().count();

        if token.starts_with("--") || (length == 2 && token.starts_with('-')) {
            let key = flags.resolve(token);
            parsed.values.insert(key.clone(), ArgValue::Flag(true));
            current = Some(key);
        } else if token.starts_with('-') && length > 2 {
            for letter in token.chars().skip(1) {
                let key = flags.resolve_short(letter);
                parsed.values.insert(key.clone(), ArgValue::Flag(true));
                current = Some(key);
            }
        } else {
            match &current {
                Some(key) => {
                    let kind = flags.kind(key);
                    parsed
                        .values
                        .entry(key.clone())
                        .or_insert(ArgValue::Flag(true))
                        .push(token.to_string(), kind);
                }
                None => {
                    warn!(value = token, "orphaned value without a preceding flag, ignoring");
                    parsed.orphans.push(token.to_string());
                }
            }
        }
    }

    parsed
}
