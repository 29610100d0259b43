//! Token output formats.

use std::fmt;
use std::str::FromStr;

/// Target syntax for compiled tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenFormat {
    #[default]
    Json,
    Less,
    Sass,
    Scss,
    Css,
}

/// Unknown token format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown token format '{0}' (expected one of: json, less, sass, scss, css)")]
pub struct FormatError(pub String);

impl TokenFormat {
    /// Every supported format, in CLI order.
    pub const ALL: [TokenFormat; 5] = [
        TokenFormat::Json,
        TokenFormat::Less,
        TokenFormat::Sass,
        TokenFormat::Scss,
        TokenFormat::Css,
    ];

    /// Format name as accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenFormat::Json => "json",
            TokenFormat::Less => "less",
            TokenFormat::Sass => "sass",
            TokenFormat::Scss => "scss",
            TokenFormat::Css => "css",
        }
    }

    /// File extension of the compiled output.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Variable sigil for textual formats, `None` for json.
    pub fn sigil(&self) -> Option<&'static str> {
        match self {
            TokenFormat::Json => None,
            TokenFormat::Less => Some("@"),
            TokenFormat::Sass | TokenFormat::Scss => Some("$"),
            TokenFormat::Css => Some("--"),
        }
    }
}

impl FromStr for TokenFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| FormatError(s.to_string()))
    }
}

impl fmt::Display for TokenFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
