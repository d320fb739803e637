#![allow(dead_code)]

use async_trait::async_trait;
use issue_migrator::{
    Destination, DestinationError, ExistingIssue, IssueText, Milestone, NewIssue,
    NormalizedIssue, RateLimitInfo,
};
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Contents of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixtures_root().join(name)).unwrap()
}

/// An issue as stored by [`MemoryDestination`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredIssue {
    pub number: u64,
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    pub milestone: Option<u64>,
    pub comments: Vec<String>,
    pub closed: bool,
    pub assignees: Vec<String>,
}

#[derive(Debug, Default)]
pub struct State {
    pub issues: Vec<StoredIssue>,
    pub milestones: Vec<Milestone>,
    pub milestone_listings: usize,
    pub rate_limit_queries: usize,
    /// Answers to the next quota queries, then a full quota.
    pub rate_limits: VecDeque<RateLimitInfo>,
}

/// In-memory destination. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryDestination {
    state: Arc<Mutex<State>>,
    number_offset: u64,
    rejected_logins: HashSet<String>,
    failing_comments: bool,
}

impl MemoryDestination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out issue numbers shifted by `offset`, like a renumbering tracker.
    pub fn with_number_offset(mut self, offset: u64) -> Self {
        self.number_offset = offset;
        self
    }

    /// Refuses assignments to `login`.
    pub fn rejecting(mut self, login: &str) -> Self {
        self.rejected_logins.insert(login.to_string());
        self
    }

    /// Fails every comment write.
    pub fn failing_comments(mut self) -> Self {
        self.failing_comments = true;
        self
    }

    /// Reports `remaining` quota resetting `reset_in_secs` from now, once per entry.
    pub fn with_low_quota(self, answers: &[(u32, u64)]) -> Self {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        self.state()
            .rate_limits
            .extend(answers.iter().map(|&(remaining, reset_in_secs)| RateLimitInfo {
                remaining,
                reset: now + reset_in_secs,
                limit: 5000,
            }));
        self
    }

    /// Seeds existing issues numbered from 1.
    pub fn with_titles(self, titles: &[&str]) -> Self {
        {
            let mut state = self.state();
            for title in titles {
                let number = state.issues.len() as u64 + 1;
                state.issues.push(StoredIssue {
                    number,
                    title: (*title).to_string(),
                    body: String::new(),
                    labels: Vec::new(),
                    milestone: None,
                    comments: Vec::new(),
                    closed: false,
                    assignees: Vec::new(),
                });
            }
        }
        self
    }

    /// Seeds an existing milestone.
    pub fn with_milestone(self, number: u64, title: &str) -> Self {
        self.state().milestones.push(Milestone {
            number,
            title: title.to_string(),
        });
        self
    }

    pub fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn issues(&self) -> Vec<StoredIssue> {
        self.state().issues.clone()
    }

    pub fn issue(&self, number: u64) -> StoredIssue {
        self.state()
            .issues
            .iter()
            .find(|issue| issue.number == number)
            .cloned()
            .unwrap_or_else(|| panic!("issue {number} not stored"))
    }

    fn with_issue<T>(
        &self,
        number: u64,
        f: impl FnOnce(&mut StoredIssue) -> T,
    ) -> Result<T, DestinationError> {
        let mut state = self.state();
        let issue = state
            .issues
            .iter_mut()
            .find(|issue| issue.number == number)
            .ok_or_else(|| DestinationError::Rejected {
                message: format!("no issue {number}"),
            })?;
        Ok(f(issue))
    }
}

#[async_trait]
impl Destination for MemoryDestination {
    async fn list_issues(&self) -> Result<Vec<ExistingIssue>, DestinationError> {
        Ok(self
            .state()
            .issues
            .iter()
            .map(|issue| ExistingIssue {
                number: issue.number,
                title: issue.title.clone(),
            })
            .collect())
    }

    async fn list_milestones(&self) -> Result<Vec<Milestone>, DestinationError> {
        let mut state = self.state();
        state.milestone_listings += 1;
        Ok(state.milestones.clone())
    }

    async fn create_milestone(&self, title: &str) -> Result<Milestone, DestinationError> {
        let mut state = self.state();
        let milestone = Milestone {
            number: state.milestones.len() as u64 + 1,
            title: title.to_string(),
        };
        state.milestones.push(milestone.clone());
        Ok(milestone)
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<u64, DestinationError> {
        let mut state = self.state();
        let number = state.issues.len() as u64 + 1 + self.number_offset;
        state.issues.push(StoredIssue {
            number,
            title: issue.title.clone(),
            body: issue.body.clone(),
            labels: issue.labels.clone(),
            milestone: issue.milestone,
            comments: Vec::new(),
            closed: false,
            assignees: Vec::new(),
        });
        Ok(number)
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<(), DestinationError> {
        if self.failing_comments {
            return Err(DestinationError::Rejected {
                message: "comments are locked".to_string(),
            });
        }
        self.with_issue(number, |issue| issue.comments.push(body.to_string()))
    }

    async fn close_issue(&self, number: u64) -> Result<(), DestinationError> {
        self.with_issue(number, |issue| issue.closed = true)
    }

    async fn assign_issue(&self, number: u64, login: &str) -> Result<(), DestinationError> {
        if self.rejected_logins.contains(login) {
            return Err(DestinationError::Rejected {
                message: format!("'{login}' cannot be assigned"),
            });
        }
        self.with_issue(number, |issue| issue.assignees.push(login.to_string()))
    }

    async fn rate_limit(&self) -> Result<RateLimitInfo, DestinationError> {
        let mut state = self.state();
        state.rate_limit_queries += 1;
        Ok(state.rate_limits.pop_front().unwrap_or(RateLimitInfo {
            remaining: 5000,
            reset: 0,
            limit: 5000,
        }))
    }
}

/// An open issue with a plain description and no comments.
pub fn issue(id: u64) -> NormalizedIssue {
    NormalizedIssue {
        id,
        summary: format!("Issue {id}"),
        open: true,
        labels: BTreeSet::new(),
        milestone: None,
        owner: None,
        description: IssueText::plain(format!("Body of {id}")),
        comments: Vec::new(),
    }
}

pub fn comment(text: &str, author: &str) -> IssueText {
    IssueText::authored(text, author, None, None)
}
