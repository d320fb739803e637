//! Canonical issue representation.
//!
//! Source tickets are normalized into [`NormalizedIssue`] values. Numbering
//! gaps left by deleted source tickets are filled with [`PlaceholderIssue`]s.
//! Both travel through the writer as a single [`MigrationIssue`].

mod placeholder;
mod text;

pub use placeholder::{is_placeholder_title, PlaceholderIssue, PLACEHOLDER_TITLE};
pub use text::{IssueText, DATE_FORMAT};

use std::collections::BTreeSet;

/// Prefix marking an owner identity as a destination login that can be assigned.
pub const ASSIGNABLE_MARKER: char = '@';

/// A source ticket converted into the destination's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedIssue {
    /// Source ticket id. Also the destination number it must land on.
    pub id: u64,

    /// Issue title.
    pub summary: String,

    /// Whether the ticket is still open.
    pub open: bool,

    /// Labels derived from type, priority and status.
    pub labels: BTreeSet<String>,

    /// Validated milestone token, e.g. `2.1`.
    pub milestone: Option<String>,

    /// Owner identity. Prefixed with [`ASSIGNABLE_MARKER`] when it names a
    /// destination login.
    pub owner: Option<String>,

    /// Issue description.
    pub description: IssueText,

    /// Comments in source chronological order.
    pub comments: Vec<IssueText>,
}

/// Either a real source ticket or a placeholder filling a numbering gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationIssue {
    /// A ticket that exists in the source tracker.
    Real(NormalizedIssue),

    /// A stand-in for a ticket id the source no longer has.
    Placeholder(PlaceholderIssue),
}

impl MigrationIssue {
    /// Source id and expected destination number.
    #[must_use]
    pub fn id(&self) -> u64 {
        match self {
            Self::Real(issue) => issue.id,
            Self::Placeholder(placeholder) => placeholder.id,
        }
    }

    /// Destination issue title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Real(issue) => &issue.summary,
            Self::Placeholder(_) => PLACEHOLDER_TITLE,
        }
    }

    /// Whether the destination issue stays open after creation.
    #[must_use]
    pub fn is_open(&self) -> bool {
        match self {
            Self::Real(issue) => issue.open,
            Self::Placeholder(_) => false,
        }
    }

    /// Labels to apply, in stable order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        match self {
            Self::Real(issue) => issue.labels.iter().cloned().collect(),
            Self::Placeholder(_) => Vec::new(),
        }
    }

    /// Milestone token, if any.
    #[must_use]
    pub fn milestone(&self) -> Option<&str> {
        match self {
            Self::Real(issue) => issue.milestone.as_deref(),
            Self::Placeholder(_) => None,
        }
    }

    /// Destination login to assign, with the marker stripped.
    ///
    /// Plain display names are not assignable and yield `None`.
    #[must_use]
    pub fn assignee(&self) -> Option<&str> {
        match self {
            Self::Real(issue) => issue
                .owner
                .as_deref()
                .and_then(|owner| owner.strip_prefix(ASSIGNABLE_MARKER))
                .map(str::trim)
                .filter(|login| !login.is_empty()),
            Self::Placeholder(_) => None,
        }
    }

    /// Issue description.
    #[must_use]
    pub fn description(&self) -> &IssueText {
        match self {
            Self::Real(issue) => &issue.description,
            Self::Placeholder(placeholder) => &placeholder.description,
        }
    }

    /// Comments in the order they must appear.
    #[must_use]
    pub fn comments(&self) -> &[IssueText] {
        match self {
            Self::Real(issue) => &issue.comments,
            Self::Placeholder(_) => &[],
        }
    }

    /// Returns true for placeholder issues.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

impl From<NormalizedIssue> for MigrationIssue {
    fn from(issue: NormalizedIssue) -> Self {
        Self::Real(issue)
    }
}

impl From<PlaceholderIssue> for MigrationIssue {
    fn from(placeholder: PlaceholderIssue) -> Self {
        Self::Placeholder(placeholder)
    }
}
