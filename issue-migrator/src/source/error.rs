//! Source reading error types.

use thiserror::Error;

/// Errors that can occur while reading the legacy tracker.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed or returned an error status.
    #[error("Source request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The list export is not valid CSV.
    #[error("Malformed export page: {0}")]
    Csv(#[from] csv::Error),

    /// A source URL could not be built.
    #[error("Invalid source URL: {0}")]
    Url(#[from] url::ParseError),
}
