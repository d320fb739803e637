//! Conversion of raw export rows and detail pages into [`NormalizedIssue`]s.

mod date;
mod detail;
mod error;
mod labels;
mod text;

pub use date::{resolve_date, DateParseError};
pub use detail::{parse_detail, RawDetail, RawEntry};
pub use error::NormalizeError;
pub use labels::{derive_labels, is_open, validate_milestone};
pub use text::{extract_text, is_empty_change, rewrite_project_links};

use crate::issues::{IssueText, NormalizedIssue};
use crate::source::{DetailContent, RawRow};
use crate::submitters::SubmitterMap;
use chrono::NaiveDateTime;
use tracing::{debug, warn};

/// Turns source records into canonical issues.
///
/// Holds the submitter table it maps identities through; nothing else is
/// shared between calls.
#[derive(Debug, Clone)]
pub struct Normalizer {
    project: String,
    canonical_base: String,
    submitters: SubmitterMap,
}

impl Normalizer {
    /// Creates a normalizer for `project`, rewriting links against `canonical_base`.
    #[must_use]
    pub fn new(
        project: impl Into<String>,
        canonical_base: impl Into<String>,
        submitters: SubmitterMap,
    ) -> Self {
        Self {
            project: project.into(),
            canonical_base: canonical_base.into(),
            submitters,
        }
    }

    /// Normalizes one ticket.
    ///
    /// Relative dates resolve against `now`. A detail page that could not be
    /// fetched or parsed yields a synthetic description and no comments.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::UnknownDate`] if any date on the page has an
    /// unrecognized format.
    pub fn normalize(
        &self,
        row: &RawRow,
        detail: &DetailContent,
        now: NaiveDateTime,
    ) -> Result<NormalizedIssue, NormalizeError> {
        let (description, comments) = match detail {
            DetailContent::Fetched { url, html } => match parse_detail(html) {
                Some(raw) => (
                    self.entry_text(row.id, &raw.description, url.clone(), now)?,
                    self.comment_texts(row.id, &raw.comments, url, now)?,
                ),
                None => {
                    warn!(issue_id = row.id, url = %url, "Detail page has no description");
                    (
                        IssueText::plain(format!("Failed to parse issue details from {url}")),
                        Vec::new(),
                    )
                }
            },
            DetailContent::Unavailable { url, reason } => (
                IssueText::plain(format!("Failed to get issue details from {url} ({reason})")),
                Vec::new(),
            ),
        };

        let issue = NormalizedIssue {
            id: row.id,
            summary: row.summary.trim().to_string(),
            open: is_open(&row.status),
            labels: derive_labels(&row.kind, &row.priority, &row.status),
            milestone: validate_milestone(&row.target),
            owner: self.identity(&row.owner),
            description,
            comments,
        };

        debug!(
            issue_id = issue.id,
            open = issue.open,
            labels = ?issue.labels,
            milestone = ?issue.milestone,
            comments = issue.comments.len(),
            "Normalized issue"
        );
        Ok(issue)
    }

    fn identity(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        (!raw.is_empty()).then(|| self.submitters.map(raw))
    }

    fn entry_text(
        &self,
        issue_id: u64,
        entry: &RawEntry,
        source_url: String,
        now: NaiveDateTime,
    ) -> Result<IssueText, NormalizeError> {
        let timestamp = entry
            .date
            .as_deref()
            .map(|date| resolve_date(date, now))
            .transpose()
            .map_err(|source| NormalizeError::UnknownDate { issue_id, source })?;

        Ok(IssueText {
            text: extract_text(&entry.body_html, &self.project, &self.canonical_base),
            author: entry.author.as_deref().and_then(|author| self.identity(author)),
            timestamp,
            source_url: Some(source_url),
        })
    }

    fn comment_texts(
        &self,
        issue_id: u64,
        entries: &[RawEntry],
        detail_url: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<IssueText>, NormalizeError> {
        let mut comments = Vec::with_capacity(entries.len());

        // Anchors count every comment block, including dropped ones.
        for (index, entry) in entries.iter().enumerate() {
            let url = format!("{detail_url}#c{}", index + 1);
            let comment = self.entry_text(issue_id, entry, url, now)?;
            if is_empty_change(&comment.text) {
                continue;
            }
            comments.push(comment);
        }

        Ok(comments)
    }
}
