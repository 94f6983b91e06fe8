//! # Theme Error Types
//!
//! Error types for palette resolution, theme derivation and configuration
//! loading.

use std::path::PathBuf;
use thiserror::Error;

use crate::palette::SwatchRole;

/// Errors that can occur in the theming engine.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// The palette has no primary swatch, so no fallback chain terminates.
    #[error("Palette is missing its primary {role} swatch")]
    MissingPrimarySwatch {
        /// The role that was required.
        role: SwatchRole,
    },

    /// A color string could not be parsed.
    #[error("Invalid color format: {0}")]
    InvalidColor(String),

    /// A swatch role name could not be parsed.
    #[error("Unknown swatch role: {0}")]
    UnknownRole(String),

    /// A configuration value is out of range or inconsistent.
    #[error("Invalid theme configuration: {0}")]
    InvalidConfig(String),

    /// Theme configuration file was not found.
    #[error("Theme config file not found: {path:?}")]
    ConfigFileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Error parsing a configuration file.
    #[error("Failed to parse theme config {path:?}: {details}")]
    ParseError {
        /// The path of the file that failed to parse.
        path: PathBuf,
        /// Details about the parse error.
        details: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error serializing or deserializing theme data.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

impl ThemeError {
    /// Create a missing primary swatch error.
    pub fn missing_primary() -> Self {
        Self::MissingPrimarySwatch {
            role: SwatchRole::PRIMARY,
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Create a config parse error.
    pub fn parse_error(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            details: details.into(),
        }
    }

    /// Returns true if this error means the palette itself was unusable.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::MissingPrimarySwatch { .. })
    }
}

impl From<serde_json::Error> for ThemeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
