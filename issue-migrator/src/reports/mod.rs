//! Read-only reports over the source tracker.
//!
//! Neither report touches the destination. The submitter report is meant
//! as the starting point of an override table.

mod submitters;

pub use submitters::{submitter_report, SubmitterReport};

use crate::normalize::derive_labels;
use crate::source::{fetch_rows, SourceError, SourceFetcher};
use std::collections::BTreeSet;
use tracing::info;

/// Collects the distinct labels the migration would apply.
///
/// # Errors
///
/// Returns an error if the export cannot be read.
pub async fn label_report(
    source: &dyn SourceFetcher,
    project: &str,
    limit: Option<usize>,
) -> Result<BTreeSet<String>, SourceError> {
    let rows = fetch_rows(source, project, 0, limit).await?;

    let labels: BTreeSet<String> = rows
        .iter()
        .flat_map(|row| derive_labels(&row.kind, &row.priority, &row.status))
        .collect();

    info!(rows = rows.len(), labels = labels.len(), "Collected labels");
    Ok(labels)
}
