//! Status, label and milestone derivation.

use std::collections::BTreeSet;

/// Statuses that mean the ticket is closed.
const CLOSED_STATES: [&str; 5] = ["wontfix", "done", "invalid", "duplicate", "fixed"];

/// Statuses worth keeping as labels because `open` alone loses them.
const KEPT_STATES: [&str; 4] = ["pending", "invalid", "duplicate", "wontfix"];

/// Prefix for priority labels.
const PRIORITY_PREFIX: &str = "prio-";

/// Returns true unless `status` is one of the closed states.
#[must_use]
pub fn is_open(status: &str) -> bool {
    let status = status.trim().to_lowercase();
    !CLOSED_STATES.contains(&status.as_str())
}

/// Maps a source ticket type to a destination label.
fn type_label(kind: &str) -> Option<&'static str> {
    match kind.trim().to_lowercase().as_str() {
        "defect" => Some("bug"),
        "enhancement" => Some("enhancement"),
        "task" => Some("task"),
        _ => None,
    }
}

/// Derives the label set for a ticket.
///
/// * a recognized type contributes its mapped label
/// * a non-empty priority contributes `prio-<priority>`
/// * a status from the kept list contributes itself
///
/// All labels are lower-cased.
#[must_use]
pub fn derive_labels(kind: &str, priority: &str, status: &str) -> BTreeSet<String> {
    let mut labels = BTreeSet::new();

    if let Some(label) = type_label(kind) {
        labels.insert(label.to_string());
    }

    let priority = priority.trim();
    if !priority.is_empty() {
        labels.insert(format!("{PRIORITY_PREFIX}{}", priority.to_lowercase()));
    }

    let status = status.trim().to_lowercase();
    if KEPT_STATES.contains(&status.as_str()) {
        labels.insert(status);
    }

    labels
}

/// Validates a milestone token.
///
/// Accepts two or more dot-separated, purely numeric segments (`2.1`,
/// `10.0.3`). Anything else means no milestone.
#[must_use]
pub fn validate_milestone(token: &str) -> Option<String> {
    let token = token.trim();
    let segments: Vec<&str> = token.split('.').collect();

    let valid = segments.len() >= 2
        && segments
            .iter()
            .all(|segment| !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()));

    valid.then(|| token.to_string())
}
