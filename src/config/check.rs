//! Settings validation against the option schema

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::settings::Settings;
use crate::cli::OptionSchema;

/// Result of checking settings
///
/// `pass` is false only for type or enumeration mismatches on recognized
/// options. Unknown options are reported as warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputCheck {
    pub pass: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Default for InputCheck {
    fn default() -> Self {
        Self {
            pass: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Check every setting against its schema entry
pub fn check_input(settings: &Settings, schema: &OptionSchema) -> InputCheck {
    let mut check = InputCheck::default();

    // already logged by the tokenizer
    for orphan in settings.orphans() {
        check
            .warnings
            .push(format!("The value \"{}\" has no preceding option and was ignored", orphan));
    }

    for (key, value) in settings.values() {
        let Some(option) = schema.get(key) else {
            let message = format!("The option \"{}\" is not recognized and will be ignored", key);
            warn!("{}", message);
            check.warnings.push(message);
            continue;
        };

        if !option.kind.matches(value) {
            check.errors.push(format!(
                "The option \"--{}\" must be of type {} but was {}",
                option.name,
                option.kind,
                type_name(value)
            ));
            continue;
        }

        if !option.allowed.is_empty() {
            let allowed = match value {
                Value::String(text) => option.allowed.iter().any(|a| a == text),
                Value::Array(items) => items
                    .iter()
                    .all(|item| item.as_str().is_some_and(|text| option.allowed.iter().any(|a| a == text))),
                _ => false,
            };
            if !allowed {
                check.errors.push(format!(
                    "The option \"--{}\" must be one of [{}] but was {}",
                    option.name,
                    option.allowed.join(", "),
                    value
                ));
            }
        }
    }

    check.pass = check.errors.is_empty();
    check
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
