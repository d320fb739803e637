//! GitHub destination backed by octocrab.

use super::{Destination, DestinationError, ExistingIssue, Milestone, NewIssue};
use crate::rate_limit::RateLimitInfo;
use async_trait::async_trait;
use octocrab::models::IssueState;
use octocrab::{params, Octocrab};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// Results per page for listings.
const RESULTS_PER_PAGE: u8 = 100;

/// Milestone fields returned by the REST API.
#[derive(Debug, Deserialize)]
struct MilestoneResponse {
    number: u64,
    title: String,
}

impl From<MilestoneResponse> for Milestone {
    fn from(response: MilestoneResponse) -> Self {
        Self {
            number: response.number,
            title: response.title,
        }
    }
}

/// A GitHub repository receiving migrated issues.
pub struct GitHubDestination {
    octocrab: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubDestination {
    /// Creates a destination for `full_name` (`owner/name`) using an existing client.
    ///
    /// # Errors
    ///
    /// Returns [`DestinationError::InvalidRepository`] if the name is malformed.
    pub fn new(octocrab: Octocrab, full_name: &str) -> Result<Self, DestinationError> {
        let (owner, repo) = split_repository(full_name)?;
        Ok(Self {
            octocrab,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Creates a destination authenticated with a personal access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is malformed or the client cannot be built.
    pub fn from_token(token: String, full_name: &str) -> Result<Self, DestinationError> {
        let octocrab = Octocrab::builder().personal_token(token).build()?;
        Self::new(octocrab, full_name)
    }

    /// Full repository name in "owner/name" format.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    fn milestones_route(&self) -> String {
        format!("/repos/{}/{}/milestones", self.owner, self.repo)
    }
}

/// Splits `owner/name` into its parts.
fn split_repository(full_name: &str) -> Result<(&str, &str), DestinationError> {
    match full_name.split_once('/') {
        Some((owner, repo))
            if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
        {
            Ok((owner, repo))
        }
        _ => Err(DestinationError::InvalidRepository {
            name: full_name.to_string(),
        }),
    }
}

#[async_trait]
impl Destination for GitHubDestination {
    async fn list_issues(&self) -> Result<Vec<ExistingIssue>, DestinationError> {
        debug!(repo = %self.full_name(), "Listing existing issues");

        let page = self
            .octocrab
            .issues(&self.owner, &self.repo)
            .list()
            .state(params::State::All)
            .per_page(RESULTS_PER_PAGE)
            .send()
            .await?;

        // Pull requests share the issue number sequence, so they are counted too.
        let issues = self
            .octocrab
            .all_pages::<octocrab::models::issues::Issue>(page)
            .await?;

        Ok(issues
            .into_iter()
            .map(|issue| ExistingIssue {
                number: issue.number,
                title: issue.title,
            })
            .collect())
    }

    async fn list_milestones(&self) -> Result<Vec<Milestone>, DestinationError> {
        let route = self.milestones_route();
        let mut milestones = Vec::new();

        for page in 1u32.. {
            let batch: Vec<MilestoneResponse> = self
                .octocrab
                .get(
                    &route,
                    Some(&json!({
                        "state": "all",
                        "per_page": RESULTS_PER_PAGE,
                        "page": page,
                    })),
                )
                .await?;

            let last_page = batch.len() < usize::from(RESULTS_PER_PAGE);
            milestones.extend(batch.into_iter().map(Milestone::from));
            if last_page {
                break;
            }
        }

        debug!(count = milestones.len(), "Listed milestones");
        Ok(milestones)
    }

    async fn create_milestone(&self, title: &str) -> Result<Milestone, DestinationError> {
        let created: MilestoneResponse = self
            .octocrab
            .post(self.milestones_route(), Some(&json!({ "title": title })))
            .await?;
        Ok(created.into())
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<u64, DestinationError> {
        let created = self
            .octocrab
            .issues(&self.owner, &self.repo)
            .create(&issue.title)
            .body(&issue.body)
            .labels(issue.labels.clone())
            .milestone(issue.milestone)
            .send()
            .await?;
        Ok(created.number)
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<(), DestinationError> {
        self.octocrab
            .issues(&self.owner, &self.repo)
            .create_comment(number, body)
            .await?;
        Ok(())
    }

    async fn close_issue(&self, number: u64) -> Result<(), DestinationError> {
        self.octocrab
            .issues(&self.owner, &self.repo)
            .update(number)
            .state(IssueState::Closed)
            .send()
            .await?;
        Ok(())
    }

    async fn assign_issue(&self, number: u64, login: &str) -> Result<(), DestinationError> {
        let issue = self
            .octocrab
            .issues(&self.owner, &self.repo)
            .add_assignees(number, &[login])
            .await?;

        // GitHub silently drops logins that cannot be assigned.
        let assigned = issue
            .assignees
            .iter()
            .any(|assignee| assignee.login.eq_ignore_ascii_case(login));
        if assigned {
            Ok(())
        } else {
            Err(DestinationError::Rejected {
                message: format!("'{login}' cannot be assigned to #{number}"),
            })
        }
    }

    async fn rate_limit(&self) -> Result<RateLimitInfo, DestinationError> {
        let rate_limit = self.octocrab.ratelimit().get().await?;
        let core = &rate_limit.resources.core;

        Ok(RateLimitInfo {
            remaining: core.remaining as u32,
            reset: core.reset,
            limit: core.limit as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_owner_and_repo() {
        assert_eq!(split_repository("octo/tracker").unwrap(), ("octo", "tracker"));
    }

    #[test]
    fn rejects_malformed_repository_names() {
        for name in ["", "octo", "octo/", "/tracker", "a/b/c"] {
            assert!(
                matches!(
                    split_repository(name),
                    Err(DestinationError::InvalidRepository { .. })
                ),
                "{name} should be rejected"
            );
        }
    }
}
