//! Placeholder issues for numbering gaps.

use super::IssueText;

/// Title shared by every placeholder. Resumed runs count placeholders by it.
pub const PLACEHOLDER_TITLE: &str = "Dummy issue";

const PLACEHOLDER_BODY: &str =
    "Created in place of a missing (most likely deleted) issue in the original tracker.";

/// Stand-in for a source ticket id that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderIssue {
    /// The id being filled.
    pub id: u64,

    /// Fixed explanatory description.
    pub description: IssueText,
}

impl PlaceholderIssue {
    /// Creates the placeholder for `id`.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            id,
            description: IssueText::plain(PLACEHOLDER_BODY),
        }
    }
}

/// Returns true if a destination issue title marks a placeholder.
#[must_use]
pub fn is_placeholder_title(title: &str) -> bool {
    title == PLACEHOLDER_TITLE
}
