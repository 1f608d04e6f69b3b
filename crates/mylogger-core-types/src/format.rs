//! Output formats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Renderer selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Coloured, human-oriented lines for interactive terminals
    #[default]
    Console,
    /// One JSON object per line
    Json,
}

/// Returned by the strict parser for anything but `console` or `json`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log format: {0:?}")]
pub struct ParseFormatError(pub String);

impl Format {
    /// Lenient parse used by configuration: trimmed and lowercased, exactly
    /// `console` selects the console renderer and everything else is JSON.
    pub fn parse_lossy(value: &str) -> Format {
        if value.trim().eq_ignore_ascii_case("console") {
            Format::Console
        } else {
            Format::Json
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Console => "console",
            Format::Json => "json",
        }
    }
}

impl AsRef<str> for Format {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "console" => Ok(Format::Console),
            "json" => Ok(Format::Json),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
