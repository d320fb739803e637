//! Mapping source identities to display identities.
//!
//! An optional override table maps exact source identities to display names
//! or, with a leading `@`, to destination logins. Identities missing from
//! the table fall back to a heuristic that strips the email domain.
//!
//! Table format, one mapping per line:
//!
//! ```text
//! # source identity<TAB>display identity
//! alice@example.com	@alice
//! bob.sm...@gmail.com	Bob Smith
//! ```

use crate::config::ConfigError;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Lines starting with this are ignored.
const COMMENT_MARKER: char = '#';

/// Source identity to display identity table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitterMap {
    overrides: HashMap<String, String>,
}

impl SubmitterMap {
    /// Loads the table from `path`.
    ///
    /// A missing file yields an empty table, so every identity goes through
    /// the heuristic.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file exists but cannot be read.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let map = Self::parse(&content);
                info!(
                    path = %path.display(),
                    count = map.len(),
                    "Loaded submitter overrides"
                );
                Ok(map)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Submitter table not found, using heuristics only");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::IoError {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    /// Parses table content.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut overrides = HashMap::new();

        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with(COMMENT_MARKER) {
                continue;
            }

            let mut fields = line.split('\t');
            match (fields.next(), fields.next()) {
                (Some(source), Some(display)) if !source.trim().is_empty() => {
                    overrides.insert(source.trim().to_string(), display.trim().to_string());
                }
                _ => warn!(line = index + 1, "Skipping malformed submitter mapping"),
            }
        }

        Self { overrides }
    }

    /// Resolves a raw identity to its display identity.
    #[must_use]
    pub fn map(&self, raw: &str) -> String {
        let raw = raw.trim();
        match self.overrides.get(raw) {
            Some(display) => display.clone(),
            None => {
                let name = derive_display_name(raw);
                debug!(raw, display = %name, "No submitter override");
                name
            }
        }
    }

    /// Number of overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// Returns true if there are no overrides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

/// Best-effort display name: drops any `@domain` and `%`-encoded suffix.
#[must_use]
pub fn derive_display_name(raw: &str) -> String {
    let name = raw.split_once('@').map_or(raw, |(name, _)| name);
    let name = name.split_once('%').map_or(name, |(name, _)| name);
    name.trim().to_string()
}
