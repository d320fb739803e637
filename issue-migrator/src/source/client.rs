//! HTTP client for the legacy tracker.

use super::{SourceError, SourceFetcher, DEFAULT_PAGE_SIZE};
use crate::config::Settings;
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// Columns requested from the list export, in [`super::RawRow`] order.
const COLUMN_SPEC: &str = "ID Status Type Priority Target Owner Summary";

/// Reads a project's issues over HTTP.
#[derive(Debug, Clone)]
pub struct SourceClient {
    http: reqwest::Client,
    base: Url,
    canonical_base: String,
    page_size: usize,
}

impl SourceClient {
    /// Creates a client for the tracker rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let base = Url::parse(base_url)?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("issue-migrator/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            canonical_base: base.as_str().trim_end_matches('/').to_string(),
            base,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Creates a client from loaded settings.
    ///
    /// # Errors
    ///
    /// See [`SourceClient::new`].
    pub fn from_settings(settings: &Settings) -> Result<Self, SourceError> {
        Ok(Self::new(&settings.source_base_url)?.with_page_size(settings.page_size))
    }

    /// Sets the number of rows requested per page.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// URL of one page of the list export.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Url`] if the project name produces an invalid URL.
    pub fn list_url(&self, project: &str, offset: usize, count: usize) -> Result<Url, SourceError> {
        let mut url = self.base.join(&format!("p/{project}/issues/csv"))?;
        url.query_pairs_mut()
            .append_pair("start", &offset.to_string())
            .append_pair("num", &count.to_string())
            .append_pair("colspec", COLUMN_SPEC)
            .append_pair("can", "1");
        Ok(url)
    }

    async fn get_text(&self, url: &str) -> Result<String, SourceError> {
        debug!(url, "GET");
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl SourceFetcher for SourceClient {
    async fn fetch_list_page(
        &self,
        project: &str,
        offset: usize,
        count: usize,
    ) -> Result<String, SourceError> {
        let url = self.list_url(project, offset, count)?;
        self.get_text(url.as_str()).await
    }

    async fn fetch_detail(&self, project: &str, id: u64) -> Result<String, SourceError> {
        self.get_text(&self.detail_url(project, id)).await
    }

    fn detail_url(&self, project: &str, id: u64) -> String {
        format!("{}/p/{project}/issues/detail?id={id}", self.canonical_base)
    }

    fn canonical_base(&self) -> &str {
        &self.canonical_base
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}
