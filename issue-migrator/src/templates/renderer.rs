//! Text renderer.

use crate::issues::IssueText;
use handlebars::{no_escape, Handlebars};
use serde_json::json;

const PROVENANCE: &str = "provenance";

/// Header placed above authored text.
///
/// Variables: `text`, `author`, `date` and `url`. `date` and `url` may be
/// empty strings.
pub const DEFAULT_PROVENANCE_TEMPLATE: &str = "{{#if url}}<a href=\"{{url}}\">Originally submitted</a>{{else}}Originally submitted{{/if}} by <code>{{author}}</code>{{#if date}} on {{date}}{{/if}}.\n<hr>\n\n{{text}}";

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (bodies already carry markup)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    // Bodies are markdown with inline HTML
    hbs.register_escape_fn(no_escape);

    // Enable strict mode to catch missing variables
    hbs.set_strict_mode(true);

    hbs
}

/// Renders [`IssueText`] into destination bodies.
pub struct TextRenderer {
    handlebars: Handlebars<'static>,
}

impl std::fmt::Debug for TextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRenderer").finish_non_exhaustive()
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer {
    /// Creates a renderer using [`DEFAULT_PROVENANCE_TEMPLATE`].
    #[must_use]
    pub fn new() -> Self {
        let mut handlebars = create_handlebars_registry();
        handlebars
            .register_template_string(PROVENANCE, DEFAULT_PROVENANCE_TEMPLATE)
            .expect("Invalid built-in template");
        Self { handlebars }
    }

    /// Creates a renderer using a custom provenance template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not compile.
    pub fn with_template(template: &str) -> Result<Self, super::TemplateError> {
        let mut handlebars = create_handlebars_registry();
        handlebars.register_template_string(PROVENANCE, template)?;
        Ok(Self { handlebars })
    }

    /// Renders one text block.
    ///
    /// Text without an author is returned verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render(&self, text: &IssueText) -> Result<String, super::TemplateError> {
        let Some(author) = &text.author else {
            return Ok(text.text.clone());
        };

        let data = json!({
            "text": text.text,
            "author": author,
            "date": text.formatted_date().unwrap_or_default(),
            "url": text.source_url.as_deref().unwrap_or("")
        });

        Ok(self.handlebars.render(PROVENANCE, &data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn authored() -> IssueText {
        IssueText::authored(
            "It <b>crashes</b>.",
            "alice",
            NaiveDate::from_ymd_opt(2014, 1, 5),
            Some("https://code.google.com/p/demo/issues/detail?id=1".to_string()),
        )
    }

    #[test]
    fn test_plain_text_is_verbatim() {
        let renderer = TextRenderer::new();

        let result = renderer.render(&IssueText::plain("100&#37; <i>raw</i>")).unwrap();

        assert_eq!(result, "100&#37; <i>raw</i>");
    }

    #[test]
    fn test_authored_text_gets_header() {
        let renderer = TextRenderer::new();

        let result = renderer.render(&authored()).unwrap();

        assert_eq!(
            result,
            "<a href=\"https://code.google.com/p/demo/issues/detail?id=1\">Originally submitted</a> \
             by <code>alice</code> on 5 Jan 2014.\n<hr>\n\nIt <b>crashes</b>."
        );
    }

    #[test]
    fn test_header_without_date_or_url() {
        let renderer = TextRenderer::new();
        let text = IssueText::authored("body", "bob", None, None);

        let result = renderer.render(&text).unwrap();

        assert_eq!(result, "Originally submitted by <code>bob</code>.\n<hr>\n\nbody");
    }

    #[test]
    fn test_custom_template() {
        let renderer = TextRenderer::with_template("{{author}} ({{date}}): {{text}}").unwrap();

        let result = renderer.render(&authored()).unwrap();

        assert_eq!(result, "alice (5 Jan 2014): It <b>crashes</b>.");
    }

    #[test]
    fn test_invalid_template_is_rejected() {
        let result = TextRenderer::with_template("{{#if author}}unclosed");

        assert!(matches!(
            result,
            Err(super::super::TemplateError::RegistrationError(_))
        ));
    }

    #[test]
    fn test_unknown_variable_fails_in_strict_mode() {
        let renderer = TextRenderer::with_template("{{reporter}}").unwrap();

        assert!(renderer.render(&authored()).is_err());
    }
}
