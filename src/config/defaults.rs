//! Schema defaults (layer 1)

use serde_json::{Map, Value};

use crate::cli::OptionSchema;

/// Collect the default value of every option that declares one,
/// keyed by the option's camel-cased name.
pub fn schema_defaults(schema: &OptionSchema) -> Map<String, Value> {
    schema
        .iter()
        .filter_map(|option| option.default.clone().map(|value| (option.key(), value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OptionSpec;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let defaults = schema_defaults(&OptionSchema::blender());

        assert_eq!(defaults["scope"], "@westpac");
        assert_eq!(defaults["tokensFormat"], "json");
        assert_eq!(defaults["noVersionInClass"], false);
        assert_eq!(defaults["zip"], false);
        assert!(!defaults.contains_key("brand"));
        assert!(!defaults.contains_key("include"));
    }

    #[test]
    fn test_only_declared_defaults() {
        let schema = OptionSchema::new(vec![
            OptionSpec::string("with-default", "a").with_default(json!("x")),
            OptionSpec::string("without-default", "b"),
        ])
        .unwrap();

        let defaults = schema_defaults(&schema);
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults["withDefault"], "x");
    }
}
