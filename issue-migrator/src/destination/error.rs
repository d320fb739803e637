//! Destination error types.

use thiserror::Error;

/// Errors that can occur while talking to the destination.
#[derive(Debug, Error)]
pub enum DestinationError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// Repository name not in `owner/name` form.
    #[error("Invalid repository '{name}', expected owner/name")]
    InvalidRepository { name: String },

    /// The destination accepted the request but did not apply it.
    #[error("Request rejected: {message}")]
    Rejected { message: String },
}
