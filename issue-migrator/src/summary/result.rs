//! Per-issue outcome types.

use crate::writer::WriteReport;
use serde::Serialize;

/// Result of migrating a single source issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueOutcome {
    /// Source issue id.
    pub issue_id: u64,

    /// Destination numbers of placeholders inserted before this issue.
    pub placeholders: Vec<u64>,

    /// What was written for the issue itself.
    pub report: WriteReport,
}
