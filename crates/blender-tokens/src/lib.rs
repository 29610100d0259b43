//! Design-token flattening and compilation.
//!
//! A brand ships its tokens as an arbitrarily nested tree. The blender
//! flattens that tree into a single-level map and serializes the map into
//! one of the supported target syntaxes.

mod compile;
mod flatten;
mod format;

pub use compile::{compile_tokens, BRAND_KEY, COMMENT, COMMENT_KEY, HEADER};
pub use flatten::{flatten_map, flatten_tokens, FlatTokenMap};
pub use format::{FormatError, TokenFormat};
