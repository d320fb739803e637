//! Writer error types.

use crate::destination::DestinationError;
use crate::templates::TemplateError;
use thiserror::Error;

/// Errors that abort writing an issue.
#[derive(Debug, Error)]
pub enum WriteError {
    /// A destination call failed.
    #[error(transparent)]
    Destination(#[from] DestinationError),

    /// A text block could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),
}
