//! Runner configuration.

use crate::config::Settings;
use std::path::{Path, PathBuf};

/// Configuration for a migration run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Source project name.
    source_project: String,
    /// Destination repository as `owner/name`.
    destination_repo: String,
    /// GitHub token used for API calls.
    token: String,
    /// Maximum number of source rows to process.
    limit: Option<usize>,
    /// Path to the submitter override table.
    submitters_path: Option<PathBuf>,
    /// Whether to simulate destination writes.
    dry_run: bool,
    /// Tunables loaded from the settings file.
    settings: Settings,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(
        source_project: impl Into<String>,
        destination_repo: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            source_project: source_project.into(),
            destination_repo: destination_repo.into(),
            token: token.into(),
            limit: None,
            submitters_path: None,
            dry_run: false,
            settings: Settings::default(),
        }
    }

    /// Caps the number of source rows. `None` means no cap.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the submitter override table path.
    pub fn with_submitters_path(mut self, path: Option<PathBuf>) -> Self {
        self.submitters_path = path;
        self
    }

    /// Enables or disables dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets the tunables.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the source project name.
    pub fn source_project(&self) -> &str {
        &self.source_project
    }

    /// Returns the destination repository.
    pub fn destination_repo(&self) -> &str {
        &self.destination_repo
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the row limit.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the submitter override table path.
    pub fn submitters_path(&self) -> Option<&Path> {
        self.submitters_path.as_deref()
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the tunables.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
