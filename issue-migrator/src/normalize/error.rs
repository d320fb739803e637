//! Normalization error types.

use super::DateParseError;
use thiserror::Error;

/// Errors that stop an issue from being normalized.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A date on the detail page could not be resolved.
    #[error("Issue {issue_id}: {source}")]
    UnknownDate {
        issue_id: u64,
        #[source]
        source: DateParseError,
    },
}
