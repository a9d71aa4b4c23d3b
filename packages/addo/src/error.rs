//! Error types for addo.
//!
//! Only fatal conditions are errors. Recoverable problems in the source
//! documents (a destination without a title, a taxonomy node without a name,
//! a relation that cannot be resolved) are logged with `tracing` and skipped.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the addo library.
#[derive(Debug, Error)]
pub enum AddoError {
    /// A source document is not well-formed XML.
    #[error("Malformed source document: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// A whitelisted taxonomy attribute holds something other than an integer.
    #[error("Invalid integer '{value}' for attribute '{attribute}' on taxonomy node '{node}'")]
    InvalidInteger {
        attribute: String,
        value: String,
        node: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error.
    #[error("YAML processing failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A required setting was given neither on the command line nor in the settings file.
    #[error("Missing `{0}` setting")]
    MissingSetting(String),

    /// Output path does not exist or is not a directory.
    #[error("Invalid output directory: {}", .0.display())]
    InvalidOutputDirectory(PathBuf),

    /// Template path does not exist or is not a file.
    #[error("Invalid template file: {}", .0.display())]
    InvalidTemplate(PathBuf),
}

/// Result type alias for addo operations.
pub type Result<T> = std::result::Result<T, AddoError>;
