//! Submitter identity report.

use crate::normalize::parse_detail;
use crate::source::{fetch_detail_page, fetch_rows, DetailContent, SourceError, SourceFetcher};
use crate::submitters::derive_display_name;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, info, info_span, Instrument};

/// Raw identities with the issues they appear on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitterReport {
    users: BTreeMap<String, BTreeSet<u64>>,
}

impl SubmitterReport {
    /// Records `user` on issue `id`. Blank identities are ignored.
    pub fn add(&mut self, user: &str, id: u64) {
        let user = user.trim();
        if user.is_empty() {
            return;
        }
        self.users.entry(user.to_string()).or_default().insert(id);
    }

    /// Number of distinct identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns true if no identity was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Issue ids `user` appears on.
    #[must_use]
    pub fn issues(&self, user: &str) -> Option<&BTreeSet<u64>> {
        self.users.get(user)
    }
}

/// Tab-separated, loadable as an override table once edited.
impl fmt::Display for SubmitterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# User\tDisplay\tIssues")?;
        for (user, ids) in &self.users {
            let ids = ids
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "{user}\t{}\t{ids}", derive_display_name(user))?;
        }
        Ok(())
    }
}

/// Collects owners, reporters and commenters of every issue.
///
/// Detail pages that cannot be fetched or parsed only contribute their owner.
///
/// # Errors
///
/// Returns an error if the export cannot be read.
pub async fn submitter_report(
    source: &dyn SourceFetcher,
    project: &str,
    limit: Option<usize>,
) -> Result<SubmitterReport, SourceError> {
    let rows = fetch_rows(source, project, 0, limit).await?;
    let mut report = SubmitterReport::default();

    for row in &rows {
        report.add(&row.owner, row.id);

        let span = info_span!("issue", issue_id = row.id);
        let detail = fetch_detail_page(source, project, row.id)
            .instrument(span)
            .await;
        let DetailContent::Fetched { html, .. } = detail else {
            continue;
        };

        match parse_detail(&html) {
            Some(detail) => {
                let entries = std::iter::once(&detail.description).chain(&detail.comments);
                for author in entries.filter_map(|entry| entry.author.as_deref()) {
                    report.add(author, row.id);
                }
            }
            None => debug!(issue_id = row.id, "Detail page has no description"),
        }
    }

    info!(users = report.len(), "Collected submitters");
    Ok(report)
}
