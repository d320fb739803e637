//! Detail page parsing.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".issuedescription").expect("Invalid selector"));
static COMMENT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".issuecomment").expect("Invalid selector"));
static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("pre").expect("Invalid selector"));
static USER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".userlink").expect("Invalid selector"));
static DATE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".date").expect("Invalid selector"));

/// A text block as found on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Author identity as shown on the page.
    pub author: Option<String>,

    /// Date text as shown on the page.
    pub date: Option<String>,

    /// Inner HTML of the body, multiple blocks joined by newlines.
    pub body_html: String,
}

/// Description and comments of one ticket, unprocessed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDetail {
    /// The ticket description.
    pub description: RawEntry,

    /// Comment blocks in page order, including status-only changes.
    pub comments: Vec<RawEntry>,
}

/// Parses a detail page. Returns `None` if it has no description block.
#[must_use]
pub fn parse_detail(html: &str) -> Option<RawDetail> {
    let document = Html::parse_document(html);

    let description = document.select(&DESCRIPTION).next()?;
    if description.select(&BODY).next().is_none() {
        return None;
    }

    // The reporter's link sits next to, not inside, the description on some pages.
    let description = RawEntry {
        author: first_text(description, &USER)
            .or_else(|| document.select(&USER).next().and_then(element_text)),
        date: first_text(description, &DATE),
        body_html: body_html(description),
    };

    let comments = document.select(&COMMENT).map(parse_entry).collect();

    Some(RawDetail {
        description,
        comments,
    })
}

fn parse_entry(element: ElementRef<'_>) -> RawEntry {
    RawEntry {
        author: first_text(element, &USER),
        date: first_text(element, &DATE),
        body_html: body_html(element),
    }
}

fn body_html(element: ElementRef<'_>) -> String {
    element
        .select(&BODY)
        .map(|pre| pre.inner_html())
        .collect::<Vec<_>>()
        .join("\n")
}

fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element.select(selector).next().and_then(element_text)
}

fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
