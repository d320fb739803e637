//! Reading the legacy tracker's export.
//!
//! The list export is a CSV document served in pages. A page that stops
//! short of the full result set ends with a row whose first field carries a
//! truncation notice; [`fetch_rows`] follows those notices until the last page.

mod client;
mod error;
mod row;

pub use client::SourceClient;
pub use error::SourceError;
pub use row::{RawRow, ROW_ARITY};

use async_trait::async_trait;
use tracing::{debug, info, info_span, warn, Instrument};

/// Rows requested per page when no other size is configured.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Marker found in the first field of a truncated page's notice row.
pub const TRUNCATION_SENTINEL: &str = "truncated";

/// Read access to the legacy tracker.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetches one page of the CSV list export starting at `offset` (0-based).
    async fn fetch_list_page(
        &self,
        project: &str,
        offset: usize,
        count: usize,
    ) -> Result<String, SourceError>;

    /// Fetches the HTML detail page of one ticket.
    async fn fetch_detail(&self, project: &str, id: u64) -> Result<String, SourceError>;

    /// Public URL of a ticket's detail page.
    fn detail_url(&self, project: &str, id: u64) -> String;

    /// Root URL that project-relative links are rewritten against.
    fn canonical_base(&self) -> &str;

    /// Rows requested per page.
    fn page_size(&self) -> usize {
        DEFAULT_PAGE_SIZE
    }
}

/// Raw detail page of one ticket, or the reason it could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailContent {
    /// The page was retrieved.
    Fetched {
        /// URL the page was fetched from.
        url: String,
        /// Page HTML.
        html: String,
    },

    /// The page could not be retrieved.
    Unavailable {
        /// URL that was attempted.
        url: String,
        /// Why the fetch failed.
        reason: String,
    },
}

impl DetailContent {
    /// URL of the detail page.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Fetched { url, .. } | Self::Unavailable { url, .. } => url,
        }
    }

    /// Returns true if the page could not be fetched.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// A parsed page of the list export.
#[derive(Debug, Default)]
pub(crate) struct ExportPage {
    pub(crate) rows: Vec<RawRow>,
    pub(crate) truncated: bool,
}

/// Parses one CSV page.
///
/// The header line is skipped, blank and malformed rows are skipped with a
/// warning, and a truncation notice sets [`ExportPage::truncated`].
pub(crate) fn parse_export_page(body: &str) -> Result<ExportPage, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut page = ExportPage::default();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        if record
            .get(0)
            .is_some_and(|first| first.contains(TRUNCATION_SENTINEL))
        {
            page.truncated = true;
            continue;
        }

        match RawRow::from_record(&record) {
            Some(row) => page.rows.push(row),
            None => warn!(row = ?record, "Skipping malformed export row"),
        }
    }

    Ok(page)
}

/// Fetches export rows starting at `start` (0-based), following truncated pages.
///
/// A `limit` of `None` or `Some(0)` means no cap. A positive limit bounds the
/// number of rows returned and stops paging once reached.
///
/// # Errors
///
/// Returns [`SourceError`] if any page cannot be fetched or parsed. There is
/// no retry at this layer.
pub async fn fetch_rows(
    source: &dyn SourceFetcher,
    project: &str,
    start: usize,
    limit: Option<usize>,
) -> Result<Vec<RawRow>, SourceError> {
    let span = info_span!("fetch_rows", project, start, limit = ?limit);

    async {
        let limit = limit.filter(|limit| *limit > 0);
        let page_size = source.page_size().max(1);
        let mut rows: Vec<RawRow> = Vec::new();
        let mut offset = start;

        loop {
            let batch = match limit {
                Some(limit) => page_size.min(limit - rows.len()),
                None => page_size,
            };
            if batch == 0 {
                break;
            }

            debug!(offset, batch, "Fetching export page");
            let body = source.fetch_list_page(project, offset, batch).await?;
            let page = parse_export_page(&body)?;
            rows.extend(page.rows.into_iter().take(batch));

            if !page.truncated {
                break;
            }
            offset += batch;
        }

        info!(count = rows.len(), "Read issues from source");
        Ok(rows)
    }
    .instrument(span)
    .await
}

/// Fetches a ticket's detail page, turning failures into [`DetailContent::Unavailable`].
pub async fn fetch_detail_page(source: &dyn SourceFetcher, project: &str, id: u64) -> DetailContent {
    let url = source.detail_url(project, id);
    match source.fetch_detail(project, id).await {
        Ok(html) => DetailContent::Fetched { url, html },
        Err(e) => {
            warn!(issue_id = id, url = %url, error = %e, "Failed to fetch issue details");
            DetailContent::Unavailable {
                url,
                reason: e.to_string(),
            }
        }
    }
}
