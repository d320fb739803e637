//! Configuration loading.
//!
//! This module handles the optional `settings.toml` file. The submitter
//! override table lives in [`crate::submitters`] but reports its failures
//! through the same [`ConfigError`].

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{Settings, DEFAULT_COMMENT_DELAY_MS, DEFAULT_SOURCE_BASE_URL};

use std::path::Path;
use tracing::info;

/// Loads settings from `path`, or returns the defaults when no path is given.
///
/// # Errors
///
/// Returns [`ConfigError`] if a given file cannot be loaded or is invalid.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "Loading settings file");
            Settings::load(path)
        }
        None => Ok(Settings::default()),
    }
}
