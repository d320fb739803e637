#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod destination;
pub mod issues;
pub mod migrator;
pub mod normalize;
pub mod rate_limit;
pub mod reports;
pub mod runner;
pub mod source;
pub mod submitters;
pub mod summary;
pub mod templates;
pub mod writer;

pub use config::{load_settings, ConfigError, Settings};
pub use destination::{
    Destination, DestinationError, DryRunDestination, ExistingIssue, GitHubDestination, Milestone,
    NewIssue,
};
pub use issues::{IssueText, MigrationIssue, NormalizedIssue, PlaceholderIssue};
pub use migrator::{MigrationError, Migrator, ResumePoint};
pub use normalize::{resolve_date, DateParseError, NormalizeError, Normalizer};
pub use rate_limit::{ensure_quota, wait_if_needed, RateLimitInfo, RateLimitPolicy};
pub use reports::{label_report, submitter_report, SubmitterReport};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use source::{
    fetch_detail_page, fetch_rows, DetailContent, RawRow, SourceClient, SourceError, SourceFetcher,
};
pub use submitters::SubmitterMap;
pub use summary::{IssueOutcome, RunSummary};
pub use templates::{TemplateError, TextRenderer};
pub use writer::{AssignmentStatus, WriteError, WriteReport, Writer};
