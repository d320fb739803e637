//! Text blocks carried over from the source tracker.

use chrono::NaiveDate;

/// Format used when a resolved date is shown to readers, e.g. `5 Jan 2014`.
pub const DATE_FORMAT: &str = "%-d %b %Y";

/// A description or comment body together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueText {
    /// Markdown-compatible body with source links already rewritten.
    pub text: String,

    /// Display identity of the original author.
    pub author: Option<String>,

    /// Day the text was posted on the source tracker.
    pub timestamp: Option<NaiveDate>,

    /// Link back to the text on the source tracker.
    pub source_url: Option<String>,
}

impl IssueText {
    /// Creates text without provenance. Renders verbatim.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: None,
            timestamp: None,
            source_url: None,
        }
    }

    /// Creates text credited to an author.
    #[must_use]
    pub fn authored(
        text: impl Into<String>,
        author: impl Into<String>,
        timestamp: Option<NaiveDate>,
        source_url: Option<String>,
    ) -> Self {
        Self {
            text: text.into(),
            author: Some(author.into()),
            timestamp,
            source_url,
        }
    }

    /// The timestamp formatted with [`DATE_FORMAT`].
    #[must_use]
    pub fn formatted_date(&self) -> Option<String> {
        self.timestamp
            .map(|date| date.format(DATE_FORMAT).to_string())
    }
}
