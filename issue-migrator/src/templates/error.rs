//! Template error types.

/// Errors from compiling or rendering the provenance template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Rendering failed, e.g. on an unknown variable.
    #[error("Template rendering error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    /// The template does not compile.
    #[error("Template registration error: {0}")]
    RegistrationError(#[from] handlebars::TemplateError),
}
