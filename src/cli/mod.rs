//! Command-line surface
//!
//! The option schema and the tokenizer that applies it to raw arguments.

mod schema;
mod tokenizer;

pub use schema::{camel_case, OptionKind, OptionSchema, OptionSpec, SchemaError};
pub use tokenizer::{tokenize, ArgValue, ParsedArguments};
