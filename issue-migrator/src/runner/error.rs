//! Runner error types.

/// Errors that end a migration run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Settings or submitter table loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Source listing errors.
    #[error(transparent)]
    Source(#[from] crate::source::SourceError),

    /// Issue normalization errors.
    #[error(transparent)]
    Normalize(#[from] crate::normalize::NormalizeError),

    /// Id alignment and write errors.
    #[error(transparent)]
    Migration(#[from] crate::migrator::MigrationError),

    /// Destination setup and read errors.
    #[error(transparent)]
    Destination(#[from] crate::destination::DestinationError),

    /// Invalid provenance template.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),
}
