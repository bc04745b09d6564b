//! Crate-level error types.

use std::fmt;

/// Errors produced by the orbiter crate.
///
/// The camera facade itself never fails; these cover loading and saving
/// option presets.
#[derive(Debug)]
pub enum OrbiterError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// JSON camera state encoding/decoding failure.
    Json(String),
}

impl fmt::Display for OrbiterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Json(msg) => write!(f, "camera state error: {msg}"),
        }
    }
}

impl std::error::Error for OrbiterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OrbiterError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for OrbiterError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
