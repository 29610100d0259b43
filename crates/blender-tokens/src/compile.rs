//! Token compilation into textual formats.

use serde_json::{Map, Value};

use crate::flatten::FlatTokenMap;
use crate::format::TokenFormat;

/// Notice carried by every compiled token file.
pub const COMMENT: &str =
    "This file was generated by the GEL blender from the brand tokens. Do not edit it by hand.";

/// Reserved leading key holding [`COMMENT`] in json output.
pub const COMMENT_KEY: &str = "_comment";

/// Reserved key holding the brand code; emitted as a quoted string.
pub const BRAND_KEY: &str = "BRAND";

/// Header prefixed to every non-json output.
pub const HEADER: &str = "/*\n * GEL design tokens\n *\n * This file was generated by the GEL blender from the brand tokens.\n * Do not edit it by hand.\n */\n";

/// Compile a flat token map into the requested format.
pub fn compile_tokens(tokens: &FlatTokenMap, format: TokenFormat) -> String {
    match format.sigil() {
        None => compile_json(tokens),
        Some(sigil) => compile_text(tokens, sigil, format == TokenFormat::Css),
    }
}

fn compile_json(tokens: &FlatTokenMap) -> String {
    let mut out = Map::with_capacity(tokens.len() + 1);
    out.insert(COMMENT_KEY.to_string(), Value::String(COMMENT.to_string()));
    for (key, value) in tokens {
        if key == COMMENT_KEY {
            continue;
        }
        out.insert(key.clone(), value.clone());
    }
    format!("{:#}\n", Value::Object(out))
}

fn compile_text(tokens: &FlatTokenMap, sigil: &str, wrap_root: bool) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');

    let indent = if wrap_root {
        out.push_str("root {\n");
        "\t"
    } else {
        ""
    };

    for (key, value) in tokens {
        out.push_str(&format!(
            "{}{}{}: {};\n",
            indent,
            sigil,
            key,
            value_text(key, value)
        ));
    }

    if wrap_root {
        out.push_str("}\n");
    }
    out
}

fn value_text(key: &str, value: &Value) -> String {
    match value {
        Value::String(text) if key == BRAND_KEY => format!("\"{}\"", text.replace('"', "\\\"")),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
