//! Read-only destination wrapper used for previews.

use super::{Destination, DestinationError, ExistingIssue, Milestone, NewIssue};
use crate::rate_limit::RateLimitInfo;
use async_trait::async_trait;
use std::sync::Mutex;
use tracing::info;

#[derive(Debug, Default)]
struct Simulated {
    next_issue: Option<u64>,
    next_milestone: Option<u64>,
}

/// Forwards reads to the wrapped destination and only logs writes.
///
/// Issue and milestone numbers are simulated from the wrapped destination's
/// current contents, so the migrator's alignment checks still hold.
pub struct DryRunDestination {
    inner: Box<dyn Destination>,
    simulated: Mutex<Simulated>,
}

impl DryRunDestination {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: Box<dyn Destination>) -> Self {
        Self {
            inner,
            simulated: Mutex::new(Simulated::default()),
        }
    }

    fn simulated(&self) -> std::sync::MutexGuard<'_, Simulated> {
        self.simulated
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl Destination for DryRunDestination {
    async fn list_issues(&self) -> Result<Vec<ExistingIssue>, DestinationError> {
        let issues = self.inner.list_issues().await?;
        let last = issues.iter().map(|issue| issue.number).max().unwrap_or(0);
        self.simulated().next_issue.get_or_insert(last + 1);
        Ok(issues)
    }

    async fn list_milestones(&self) -> Result<Vec<Milestone>, DestinationError> {
        let milestones = self.inner.list_milestones().await?;
        let last = milestones.iter().map(|m| m.number).max().unwrap_or(0);
        self.simulated().next_milestone.get_or_insert(last + 1);
        Ok(milestones)
    }

    async fn create_milestone(&self, title: &str) -> Result<Milestone, DestinationError> {
        let unknown = self.simulated().next_milestone.is_none();
        if unknown {
            self.list_milestones().await?;
        }

        let number = {
            let mut simulated = self.simulated();
            let number = simulated.next_milestone.unwrap_or(1);
            simulated.next_milestone = Some(number + 1);
            number
        };

        info!(milestone = %title, number, "[DRY RUN] Would create milestone");
        Ok(Milestone {
            number,
            title: title.to_string(),
        })
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<u64, DestinationError> {
        let unknown = self.simulated().next_issue.is_none();
        if unknown {
            self.list_issues().await?;
        }

        let number = {
            let mut simulated = self.simulated();
            let number = simulated.next_issue.unwrap_or(1);
            simulated.next_issue = Some(number + 1);
            number
        };

        info!(
            number,
            title = %issue.title,
            labels = ?issue.labels,
            milestone = ?issue.milestone,
            "[DRY RUN] Would create issue"
        );
        Ok(number)
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<(), DestinationError> {
        info!(number, length = body.len(), "[DRY RUN] Would add comment");
        Ok(())
    }

    async fn close_issue(&self, number: u64) -> Result<(), DestinationError> {
        info!(number, "[DRY RUN] Would close issue");
        Ok(())
    }

    async fn assign_issue(&self, number: u64, login: &str) -> Result<(), DestinationError> {
        info!(number, login, "[DRY RUN] Would assign issue");
        Ok(())
    }

    async fn rate_limit(&self) -> Result<RateLimitInfo, DestinationError> {
        Ok(RateLimitInfo::unlimited())
    }
}
