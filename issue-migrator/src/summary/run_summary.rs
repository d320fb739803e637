//! Run summary types.

use super::result::IssueOutcome;
use serde::Serialize;
use std::fmt;

/// Summary of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Number of source issues migrated.
    pub issues_migrated: usize,

    /// Number of placeholder issues inserted.
    pub placeholders_created: usize,

    /// Number of comments created.
    pub comments_created: usize,

    /// Number of migrated issues closed.
    pub issues_closed: usize,

    /// Number of owner assignments the destination refused.
    pub assignments_failed: usize,

    /// Number of issues whose detail page could not be used.
    pub details_unavailable: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with an issue outcome.
    pub fn record(&mut self, outcome: &IssueOutcome) {
        self.issues_migrated += 1;
        self.placeholders_created += outcome.placeholders.len();
        self.comments_created += outcome.report.comments;
        if outcome.report.closed {
            self.issues_closed += 1;
        }
        if outcome.report.assignment.is_failed() {
            self.assignments_failed += 1;
        }
    }

    /// Counts an issue migrated without its detail page.
    pub fn record_unavailable_detail(&mut self) {
        self.details_unavailable += 1;
    }

    /// Returns true if any non-fatal failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.assignments_failed > 0 || self.details_unavailable > 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Issues migrated:      {}", self.issues_migrated)?;
        writeln!(f, "Placeholders created: {}", self.placeholders_created)?;
        writeln!(f, "Comments created:     {}", self.comments_created)?;
        writeln!(f, "Issues closed:        {}", self.issues_closed)?;
        writeln!(f, "Failed assignments:   {}", self.assignments_failed)?;
        write!(f, "Unavailable details:  {}", self.details_unavailable)
    }
}
