//! Text extraction from detail page markup.

use regex::Regex;
use std::sync::LazyLock;

/// Applied in order to the inner HTML of a text block.
const REPLACEMENTS: [(&str, &str); 9] = [
    ("<b>", "**"),
    ("</b>", "**"),
    ("<br/>", "\n"),
    ("<br />", "\n"),
    ("<br>", "\n"),
    ("<p>", "\n"),
    ("</p>", "\n"),
    ("</pre>", ""),
    ("%", "&#37;"),
];

/// Runs of blank lines left behind by adjacent block tags.
static EXTRA_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("Invalid regex pattern"));

/// Bodies the tracker records for status-only changes. Compared lower-cased.
const EMPTY_CHANGE_MARKERS: [&str; 2] = [
    "(no comment was entered for this change.)",
    "(no content entered for this change)",
];

/// Converts a text block's inner HTML into markdown-compatible text.
///
/// Links relative to the legacy project are made absolute against
/// `canonical_base`.
#[must_use]
pub fn extract_text(html: &str, project: &str, canonical_base: &str) -> String {
    let mut text = html.trim().to_string();
    for (from, to) in REPLACEMENTS {
        text = text.replace(from, to);
    }

    let text = EXTRA_BLANK_LINES.replace_all(&text, "\n\n");
    rewrite_project_links(&text, project, canonical_base)
        .trim()
        .to_string()
}

/// Rewrites `href="/p/<project>/..."` links to absolute URLs.
#[must_use]
pub fn rewrite_project_links(text: &str, project: &str, canonical_base: &str) -> String {
    let relative = format!("href=\"/p/{project}/");
    let absolute = format!(
        "href=\"{}/p/{project}/",
        canonical_base.trim_end_matches('/')
    );
    text.replace(&relative, &absolute)
}

/// Returns true if a comment body only records a change without any text.
#[must_use]
pub fn is_empty_change(text: &str) -> bool {
    let text = text.to_lowercase();
    EMPTY_CHANGE_MARKERS
        .iter()
        .any(|marker| text.contains(marker))
}
