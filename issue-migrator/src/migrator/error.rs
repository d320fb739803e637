//! Migration error types.

use crate::writer::WriteError;
use thiserror::Error;

/// Errors that stop the migration.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A source issue arrived with an id below the next destination number.
    #[error("Issue {found} arrived out of order, expected issue {expected}")]
    OutOfOrder { expected: u64, found: u64 },

    /// The destination assigned a different number than expected.
    #[error("Issue {expected} was created as destination issue {created}")]
    IdMismatch { expected: u64, created: u64 },

    /// Writing the issue, or a milestone it needs, failed.
    #[error("Failed to write issue {issue_id}: {source}")]
    Write {
        issue_id: u64,
        #[source]
        source: WriteError,
    },
}
