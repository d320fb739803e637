//! Rate-limited insertion of issues into the destination.
//!
//! Every destination write is preceded by a quota check that blocks while
//! the remaining quota is below the low-water mark. Comments are paced by a
//! fixed delay.

mod error;
mod report;

pub use error::WriteError;
pub use report::{AssignmentStatus, WriteReport};

use crate::destination::{Destination, Milestone, NewIssue};
use crate::issues::MigrationIssue;
use crate::rate_limit::{ensure_quota, RateLimitPolicy};
use crate::templates::TextRenderer;
use std::time::Duration;
use tracing::{debug, error, info};

/// Writes issues with their comments, state and assignee.
pub struct Writer<'a> {
    destination: &'a dyn Destination,
    renderer: &'a TextRenderer,
    policy: RateLimitPolicy,
    comment_delay: Duration,
}

impl<'a> Writer<'a> {
    /// Creates a writer.
    #[must_use]
    pub fn new(
        destination: &'a dyn Destination,
        renderer: &'a TextRenderer,
        policy: RateLimitPolicy,
        comment_delay: Duration,
    ) -> Self {
        Self {
            destination,
            renderer,
            policy,
            comment_delay,
        }
    }

    /// The destination this writer targets.
    #[must_use]
    pub fn destination(&self) -> &'a dyn Destination {
        self.destination
    }

    /// Creates `issue` with its comments, closes it if needed and assigns
    /// its owner.
    ///
    /// A refused assignment is logged and reported, not returned as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or any other destination write fails.
    pub async fn insert(
        &self,
        issue: &MigrationIssue,
        milestone: Option<u64>,
    ) -> Result<WriteReport, WriteError> {
        let number = self.create(issue, milestone).await?;
        self.complete(issue, number).await
    }

    /// Creates the bare issue and returns the number the destination gave it.
    ///
    /// # Errors
    ///
    /// Returns an error if the description cannot be rendered or the
    /// destination refuses the issue.
    pub async fn create(
        &self,
        issue: &MigrationIssue,
        milestone: Option<u64>,
    ) -> Result<u64, WriteError> {
        let new_issue = NewIssue {
            title: issue.title().to_string(),
            body: self.renderer.render(issue.description())?,
            labels: issue.labels(),
            milestone,
        };

        ensure_quota(self.destination, &self.policy).await?;
        let number = self.destination.create_issue(&new_issue).await?;
        info!(issue_id = issue.id(), number, title = %new_issue.title, "Created issue");
        Ok(number)
    }

    /// Adds comments, state and assignee to the already created issue `number`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or a comment or close write fails.
    pub async fn complete(
        &self,
        issue: &MigrationIssue,
        number: u64,
    ) -> Result<WriteReport, WriteError> {
        let comments = issue.comments();
        for (index, comment) in comments.iter().enumerate() {
            if index > 0 && !self.comment_delay.is_zero() {
                tokio::time::sleep(self.comment_delay).await;
            }
            let body = self.renderer.render(comment)?;
            ensure_quota(self.destination, &self.policy).await?;
            self.destination.create_comment(number, &body).await?;
            debug!(number, comment = index + 1, "Created comment");
        }

        let closed = !issue.is_open();
        if closed {
            ensure_quota(self.destination, &self.policy).await?;
            self.destination.close_issue(number).await?;
            debug!(number, "Closed issue");
        }

        let assignment = match issue.assignee() {
            Some(login) => self.assign(number, login).await,
            None => AssignmentStatus::NotRequested,
        };

        Ok(WriteReport {
            number,
            comments: comments.len(),
            closed,
            assignment,
        })
    }

    /// Creates a milestone.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination refuses the milestone.
    pub async fn create_milestone(&self, title: &str) -> Result<Milestone, WriteError> {
        ensure_quota(self.destination, &self.policy).await?;
        let milestone = self.destination.create_milestone(title).await?;
        info!(title, number = milestone.number, "Created milestone");
        Ok(milestone)
    }

    async fn assign(&self, number: u64, login: &str) -> AssignmentStatus {
        let result = match ensure_quota(self.destination, &self.policy).await {
            Ok(()) => self.destination.assign_issue(number, login).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                debug!(number, login, "Assigned issue");
                AssignmentStatus::Assigned {
                    login: login.to_string(),
                }
            }
            Err(e) => {
                error!(number, login, error = %e, "Failed to assign issue");
                AssignmentStatus::Failed {
                    login: login.to_string(),
                    error: e.to_string(),
                }
            }
        }
    }
}
