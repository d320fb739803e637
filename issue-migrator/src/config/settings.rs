//! Tunable settings loaded from an optional `settings.toml`.

use crate::config::ConfigError;
use crate::rate_limit::{RateLimitPolicy, DEFAULT_LOW_WATER_MARK, MAX_WAIT_SECS};
use crate::source::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Default root of the legacy tracker.
pub const DEFAULT_SOURCE_BASE_URL: &str = "https://code.google.com";

/// Default pause between consecutive comment creations.
pub const DEFAULT_COMMENT_DELAY_MS: u64 = 1000;

/// Largest page the source export will serve.
const MAX_PAGE_SIZE: usize = 1000;

/// Parsed settings. Every key is optional.
///
/// ```toml
/// source-base-url = "https://code.google.com"
/// page-size = 100
/// comment-delay-ms = 1000
/// low-water-mark = 50
/// max-wait-secs = 3600
/// provenance-template = "By {{author}}: {{text}}"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Settings {
    /// Root URL of the legacy tracker. Also the canonical prefix for rewritten links.
    pub source_base_url: String,

    /// Rows requested per export page.
    pub page_size: usize,

    /// Pause between consecutive comments on one issue, in milliseconds.
    pub comment_delay_ms: u64,

    /// Remaining write quota below which the writer waits for a reset.
    pub low_water_mark: u32,

    /// Upper bound on a single rate limit wait, in seconds.
    pub max_wait_secs: u64,

    /// Handlebars template for authored text. Uses the built-in one when unset.
    pub provenance_template: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_base_url: DEFAULT_SOURCE_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            comment_delay_ms: DEFAULT_COMMENT_DELAY_MS,
            low_water_mark: DEFAULT_LOW_WATER_MARK,
            max_wait_secs: MAX_WAIT_SECS,
            provenance_template: None,
        }
    }
}

impl Settings {
    /// Loads and validates settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable, not valid
    /// TOML, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading settings");

        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::MissingFile {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::IoError {
                    path: path.display().to_string(),
                    source: e,
                }
            }
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        settings.validate(path)?;
        Ok(settings)
    }

    /// Validates value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the offending key.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::ValidationError {
            path: path.display().to_string(),
            message,
        };

        if let Err(e) = url::Url::parse(&self.source_base_url) {
            return Err(invalid(format!(
                "source-base-url '{}' is not a valid URL: {e}",
                self.source_base_url
            )));
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(invalid(format!(
                "page-size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }

        if let Some(template) = &self.provenance_template {
            if template.trim().is_empty() {
                return Err(invalid("provenance-template is empty".to_string()));
            }
        }

        Ok(())
    }

    /// Pause between consecutive comments.
    #[must_use]
    pub fn comment_delay(&self) -> Duration {
        Duration::from_millis(self.comment_delay_ms)
    }

    /// Rate limit policy for destination writes.
    #[must_use]
    pub fn rate_limit_policy(&self) -> RateLimitPolicy {
        RateLimitPolicy {
            low_water_mark: self.low_water_mark,
            max_wait: Duration::from_secs(self.max_wait_secs),
        }
    }
}
