//! Id-aligned migration of normalized issues.
//!
//! Destination issue numbers mirror source ids. Gaps in the source
//! numbering are filled with placeholder issues, and every number the
//! destination hands out is checked against the expected one.

mod error;
mod resume;

pub use error::MigrationError;
pub use resume::ResumePoint;

use crate::issues::{MigrationIssue, NormalizedIssue, PlaceholderIssue};
use crate::summary::IssueOutcome;
use crate::writer::{WriteError, WriteReport, Writer};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Feeds issues to the writer in destination order.
pub struct Migrator<'a> {
    writer: Writer<'a>,
    next_expected: u64,
    milestones: Option<HashMap<String, u64>>,
}

impl<'a> Migrator<'a> {
    /// Creates a migrator continuing from `resume`.
    #[must_use]
    pub fn new(writer: Writer<'a>, resume: ResumePoint) -> Self {
        Self {
            writer,
            next_expected: resume.next_expected(),
            milestones: None,
        }
    }

    /// Number the next created issue must receive.
    #[must_use]
    pub fn next_expected(&self) -> u64 {
        self.next_expected
    }

    /// Migrates one issue, filling any numbering gap before it.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError::OutOfOrder`] if the issue id is below the
    /// next expected number, [`MigrationError::IdMismatch`] as soon as the
    /// destination assigns an unexpected number, or [`MigrationError::Write`]
    /// naming the issue whose write failed.
    pub async fn migrate(&mut self, issue: NormalizedIssue) -> Result<IssueOutcome, MigrationError> {
        let mut placeholders = Vec::new();
        while issue.id > self.next_expected {
            let placeholder = MigrationIssue::from(PlaceholderIssue::new(self.next_expected));
            warn!(issue_id = self.next_expected, "Source issue missing, inserting placeholder");
            let report = self.insert(&placeholder, None).await?;
            placeholders.push(report.number);
        }

        if issue.id != self.next_expected {
            return Err(MigrationError::OutOfOrder {
                expected: self.next_expected,
                found: issue.id,
            });
        }

        let issue_id = issue.id;
        let milestone = match issue.milestone.as_deref() {
            Some(title) => Some(
                self.resolve_milestone(title)
                    .await
                    .map_err(|source| MigrationError::Write { issue_id, source })?,
            ),
            None => None,
        };

        let report = self.insert(&MigrationIssue::from(issue), milestone).await?;

        Ok(IssueOutcome {
            issue_id,
            placeholders,
            report,
        })
    }

    async fn insert(
        &mut self,
        issue: &MigrationIssue,
        milestone: Option<u64>,
    ) -> Result<WriteReport, MigrationError> {
        let issue_id = issue.id();
        let number = self
            .writer
            .create(issue, milestone)
            .await
            .map_err(|source| MigrationError::Write { issue_id, source })?;

        // Nothing else may touch a misnumbered issue.
        if number != self.next_expected {
            return Err(MigrationError::IdMismatch {
                expected: self.next_expected,
                created: number,
            });
        }
        self.next_expected += 1;

        self.writer
            .complete(issue, number)
            .await
            .map_err(|source| MigrationError::Write { issue_id, source })
    }

    async fn resolve_milestone(&mut self, title: &str) -> Result<u64, WriteError> {
        if self.milestones.is_none() {
            let existing = self.writer.destination().list_milestones().await?;
            debug!(count = existing.len(), "Loaded destination milestones");
            self.milestones = Some(
                existing
                    .into_iter()
                    .map(|milestone| (milestone.title, milestone.number))
                    .collect(),
            );
        }
        let cache = self.milestones.get_or_insert_with(HashMap::new);

        if let Some(number) = cache.get(title) {
            return Ok(*number);
        }

        let milestone = self.writer.create_milestone(title).await?;
        info!(title, number = milestone.number, "Using new milestone");
        cache.insert(title.to_string(), milestone.number);
        Ok(milestone.number)
    }
}
