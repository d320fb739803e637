//! One row of the list export.

/// Number of leading columns every row must carry.
pub const ROW_ARITY: usize = 7;

/// A ticket as listed by the export, before normalization.
///
/// Columns in order: id, status, type, priority, target milestone, owner,
/// summary. Trailing columns are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Source ticket id.
    pub id: u64,

    /// Status, e.g. `Fixed` or `New`.
    pub status: String,

    /// Ticket type, e.g. `Defect`.
    pub kind: String,

    /// Priority, e.g. `High`.
    pub priority: String,

    /// Target milestone token.
    pub target: String,

    /// Owner identity as exported.
    pub owner: String,

    /// Ticket summary.
    pub summary: String,
}

impl RawRow {
    /// Builds a row from a CSV record. Returns `None` if the record is short
    /// or the id is not a positive integer.
    pub(crate) fn from_record(record: &csv::StringRecord) -> Option<Self> {
        if record.len() < ROW_ARITY {
            return None;
        }

        let field = |index: usize| record.get(index).unwrap_or_default().trim().to_string();
        let id = record.get(0)?.trim().parse::<u64>().ok().filter(|id| *id > 0)?;

        Some(Self {
            id,
            status: field(1),
            kind: field(2),
            priority: field(3),
            target: field(4),
            owner: field(5),
            summary: field(6),
        })
    }
}
