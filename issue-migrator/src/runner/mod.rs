//! Orchestrates a migration run.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::destination::{Destination, DryRunDestination, GitHubDestination};
use crate::migrator::{Migrator, ResumePoint};
use crate::normalize::Normalizer;
use crate::source::{fetch_detail_page, fetch_rows, RawRow, SourceClient, SourceFetcher};
use crate::submitters::SubmitterMap;
use crate::summary::RunSummary;
use crate::templates::TextRenderer;
use crate::writer::Writer;
use chrono::Local;
use std::time::Duration;
use tracing::{info, info_span, Instrument};

/// Runs the fetch, normalize and write pipeline for one project.
pub struct Runner {
    config: RunnerConfig,
    source: Box<dyn SourceFetcher>,
    destination: Box<dyn Destination>,
    renderer: TextRenderer,
}

impl Runner {
    /// Builds a runner talking to the configured source and GitHub.
    ///
    /// In dry-run mode the GitHub destination only serves reads.
    ///
    /// # Errors
    ///
    /// Returns an error if a client cannot be built or the provenance
    /// template is invalid.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let source = SourceClient::from_settings(config.settings())?;
        let github = GitHubDestination::from_token(
            config.token().to_string(),
            config.destination_repo(),
        )?;
        let destination: Box<dyn Destination> = if config.dry_run() {
            Box::new(DryRunDestination::new(Box::new(github)))
        } else {
            Box::new(github)
        };

        Self::with_parts(config, Box::new(source), destination)
    }

    /// Builds a runner from explicit source and destination implementations.
    ///
    /// # Errors
    ///
    /// Returns an error if the provenance template is invalid.
    pub fn with_parts(
        config: RunnerConfig,
        source: Box<dyn SourceFetcher>,
        destination: Box<dyn Destination>,
    ) -> Result<Self, RunnerError> {
        let renderer = match &config.settings().provenance_template {
            Some(template) => TextRenderer::with_template(template)?,
            None => TextRenderer::new(),
        };

        Ok(Self {
            config,
            source,
            destination,
            renderer,
        })
    }

    /// Executes the migration until the source is exhausted or the limit
    /// is reached.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error. Issues written before it stay on the
    /// destination and a later run resumes after them.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let config = &self.config;
        let mut summary = RunSummary::new(config.dry_run());

        let submitters = match config.submitters_path() {
            Some(path) => SubmitterMap::load(path)?,
            None => SubmitterMap::default(),
        };
        let normalizer = Normalizer::new(
            config.source_project(),
            self.source.canonical_base(),
            submitters,
        );

        let resume = ResumePoint::detect(self.destination.as_ref()).await?;
        let rows = fetch_rows(
            self.source.as_ref(),
            config.source_project(),
            resume.source_offset(),
            config.limit(),
        )
        .await?;

        if rows.is_empty() {
            info!(project = config.source_project(), "No source issues left to migrate");
            return Ok(summary);
        }
        info!(
            count = rows.len(),
            from = resume.next_expected(),
            "Migrating issues"
        );

        let comment_delay = if config.dry_run() {
            Duration::ZERO
        } else {
            config.settings().comment_delay()
        };
        let writer = Writer::new(
            self.destination.as_ref(),
            &self.renderer,
            config.settings().rate_limit_policy(),
            comment_delay,
        );
        let mut migrator = Migrator::new(writer, resume);

        for row in &rows {
            let span = info_span!("issue", issue_id = row.id);
            self.migrate_row(&normalizer, &mut migrator, row, &mut summary)
                .instrument(span)
                .await?;
        }

        info!(
            migrated = summary.issues_migrated,
            placeholders = summary.placeholders_created,
            "Migration finished"
        );
        Ok(summary)
    }

    async fn migrate_row(
        &self,
        normalizer: &Normalizer,
        migrator: &mut Migrator<'_>,
        row: &RawRow,
        summary: &mut RunSummary,
    ) -> Result<(), RunnerError> {
        let detail =
            fetch_detail_page(self.source.as_ref(), self.config.source_project(), row.id).await;
        if detail.is_unavailable() {
            summary.record_unavailable_detail();
        }

        let issue = normalizer.normalize(row, &detail, Local::now().naive_local())?;
        let outcome = migrator.migrate(issue).await?;

        info!(
            number = outcome.report.number,
            comments = outcome.report.comments,
            closed = outcome.report.closed,
            placeholders = outcome.placeholders.len(),
            "Migrated issue"
        );
        summary.record(&outcome);
        Ok(())
    }
}
