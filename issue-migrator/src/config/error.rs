//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading settings or the submitter table.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A settings or submitter file exists but cannot be read.
    #[error("Failed to read '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has unknown keys.
    #[error("Failed to parse settings in '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A setting is out of range.
    #[error("Validation error in '{path}': {message}")]
    ValidationError { path: String, message: String },

    /// An explicitly given settings file does not exist.
    #[error("Settings file not found: {path}")]
    MissingFile { path: String },
}
