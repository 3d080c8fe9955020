//! # Error Types
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! A manifest that cannot be parsed never reaches the validation engine:
//! [`DocumentParseError`] is raised by the reader and reported as
//! "manifest is not valid JSON". Rule evaluation itself has no error
//! type; a failing rule is a regular failed check.

use thiserror::Error;

/// Top-level error type for PWA Studio.
#[derive(Error, Debug)]
pub enum PwaError {
    /// The manifest text could not be turned into a document.
    #[error(transparent)]
    Parse(#[from] DocumentParseError),

    /// Serialization of a document or report failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration file could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error raised while reading or parsing manifest text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentParseError {
    /// The text is not JSON at all.
    #[error("manifest is not valid JSON: {reason}")]
    NotJson {
        /// Parser message, including line and column.
        reason: String,
    },

    /// The text is JSON, but the top-level value is not an object.
    #[error("manifest is not valid JSON: expected an object at the top level, found {found}")]
    NotAnObject {
        /// JSON type name of the value that was found.
        found: &'static str,
    },

    /// The manifest file could not be read.
    #[error("manifest load error for '{path}': {reason}")]
    Load {
        /// Path to the manifest that failed to load.
        path: String,
        /// Reason the file could not be read.
        reason: String,
    },
}

impl From<serde_json::Error> for PwaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
