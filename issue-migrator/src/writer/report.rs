//! Write report types.

use serde::Serialize;

/// Outcome of the owner assignment step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// The issue has no assignable owner.
    NotRequested,

    /// The owner was assigned.
    Assigned {
        /// Destination login.
        login: String,
    },

    /// The destination refused the assignment.
    Failed {
        /// Destination login.
        login: String,
        /// Error message.
        error: String,
    },
}

impl AssignmentStatus {
    /// Returns true if an assignment was attempted and refused.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// What the writer did for one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    /// Destination issue number.
    pub number: u64,

    /// Comments created.
    pub comments: usize,

    /// Whether the issue was closed.
    pub closed: bool,

    /// Assignment outcome.
    pub assignment: AssignmentStatus,
}
