//! Resume state derived from the destination.

use crate::destination::{Destination, DestinationError, ExistingIssue};
use crate::issues::is_placeholder_title;
use tracing::info;

/// How far a previous run got.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResumePoint {
    /// Issues already on the destination.
    pub existing: u64,

    /// How many of those are placeholders.
    pub placeholders: u64,
}

impl ResumePoint {
    /// Reads the destination's issue listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails.
    pub async fn detect(destination: &dyn Destination) -> Result<Self, DestinationError> {
        let issues = destination.list_issues().await?;
        let point = Self::from_issues(&issues);
        info!(
            existing = point.existing,
            placeholders = point.placeholders,
            "Detected resume point"
        );
        Ok(point)
    }

    /// Derives the resume point from a listing.
    #[must_use]
    pub fn from_issues(issues: &[ExistingIssue]) -> Self {
        Self {
            existing: issues.len() as u64,
            placeholders: issues
                .iter()
                .filter(|issue| is_placeholder_title(&issue.title))
                .count() as u64,
        }
    }

    /// Number the next created issue must receive.
    #[must_use]
    pub fn next_expected(&self) -> u64 {
        self.existing + 1
    }

    /// 0-based position in the source listing to continue from.
    ///
    /// Placeholders have no source row, so they are not skipped over.
    #[must_use]
    pub fn source_offset(&self) -> usize {
        self.existing.saturating_sub(self.placeholders) as usize
    }
}
