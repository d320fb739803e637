//! The live tracker issues are migrated into.
//!
//! The engine only talks to the destination through the [`Destination`]
//! trait. [`GitHubDestination`] is the real implementation and
//! [`DryRunDestination`] wraps another destination, forwarding reads and
//! simulating writes.

mod dry_run;
mod error;
mod github;

pub use dry_run::DryRunDestination;
pub use error::DestinationError;
pub use github::GitHubDestination;

use crate::rate_limit::RateLimitInfo;
use async_trait::async_trait;

/// An issue that already exists on the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingIssue {
    /// Destination issue number.
    pub number: u64,

    /// Issue title.
    pub title: String,
}

/// A destination milestone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    /// Destination-assigned milestone number.
    pub number: u64,

    /// Milestone name, e.g. `2.1`.
    pub title: String,
}

/// Payload for creating an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    /// Issue title.
    pub title: String,

    /// Rendered issue body.
    pub body: String,

    /// Labels to apply.
    pub labels: Vec<String>,

    /// Milestone number to attach.
    pub milestone: Option<u64>,
}

/// Write capability of the destination tracker.
///
/// Implementations must hand out issue numbers sequentially in creation
/// order; the migrator checks every returned number against its own count.
#[async_trait]
pub trait Destination: Send + Sync {
    /// Lists every issue (open or closed) currently on the destination.
    async fn list_issues(&self) -> Result<Vec<ExistingIssue>, DestinationError>;

    /// Lists every milestone (open or closed).
    async fn list_milestones(&self) -> Result<Vec<Milestone>, DestinationError>;

    /// Creates a milestone.
    async fn create_milestone(&self, title: &str) -> Result<Milestone, DestinationError>;

    /// Creates an issue and returns its assigned number.
    async fn create_issue(&self, issue: &NewIssue) -> Result<u64, DestinationError>;

    /// Adds a comment to an issue.
    async fn create_comment(&self, number: u64, body: &str) -> Result<(), DestinationError>;

    /// Closes an issue.
    async fn close_issue(&self, number: u64) -> Result<(), DestinationError>;

    /// Assigns a login to an issue.
    async fn assign_issue(&self, number: u64, login: &str) -> Result<(), DestinationError>;

    /// Current write quota.
    async fn rate_limit(&self) -> Result<RateLimitInfo, DestinationError>;
}
