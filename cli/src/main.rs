//! CLI for the issue migrator.
//!
//! Migrates a Google Code style issue tracker into a GitHub repository and
//! prints reports that help prepare the migration.

use clap::{Args, Parser, Subcommand};
use issue_migrator::{
    label_report, load_settings, submitter_report, RunSummary, Runner, RunnerConfig, RunnerError,
    Settings, SourceClient,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Issue Migrator - Move a legacy issue tracker into GitHub issues.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Migrate all issues of a project, resuming after any already migrated.
    Migrate(MigrateArgs),

    /// Print the distinct labels the migration would create.
    Labels(ReportArgs),

    /// Print every submitter identity, as a starting override table.
    Submitters(ReportArgs),
}

#[derive(Args, Debug)]
struct MigrateArgs {
    /// Source project name.
    source_project: String,

    /// Destination repository as `owner/name`.
    destination: String,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    #[command(flatten)]
    common: CommonArgs,

    /// Path to the submitter override table.
    #[arg(long)]
    submitters: Option<PathBuf>,

    /// Preview the migration without writing to GitHub.
    #[arg(long)]
    dry_run: bool,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Source project name.
    source_project: String,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Maximum number of source issues to process; zero or negative means all.
    #[arg(short = 'n', long, default_value_t = -1, allow_negative_numbers = true)]
    limit: i64,

    /// Path to a TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl CommonArgs {
    fn limit(&self) -> Option<usize> {
        usize::try_from(self.limit).ok().filter(|limit| *limit > 0)
    }

    fn settings(&self) -> Result<Settings, RunnerError> {
        Ok(load_settings(self.config.as_deref())?)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Parse arguments
    let cli = Cli::parse();

    // Run the main logic
    let result = match cli.command {
        Command::Migrate(args) => migrate(args).await,
        Command::Labels(args) => labels(args).await,
        Command::Submitters(args) => submitters(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
///
/// Logs go to stderr so report output on stdout stays clean.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        // Falls back to "info" level if RUST_LOG is not set or invalid
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

async fn migrate(args: MigrateArgs) -> Result<(), RunnerError> {
    let config = RunnerConfig::new(args.source_project, args.destination, args.token)
        .with_limit(args.common.limit())
        .with_submitters_path(args.submitters)
        .with_dry_run(args.dry_run)
        .with_settings(args.common.settings()?);

    let runner = Runner::new(config)?;
    let summary = runner.run().await?;
    print_summary(&summary, args.json);
    Ok(())
}

async fn labels(args: ReportArgs) -> Result<(), RunnerError> {
    let source = SourceClient::from_settings(&args.common.settings()?)?;
    let labels = label_report(&source, &args.source_project, args.common.limit()).await?;
    for label in labels {
        println!("{label}");
    }
    Ok(())
}

async fn submitters(args: ReportArgs) -> Result<(), RunnerError> {
    let source = SourceClient::from_settings(&args.common.settings()?)?;
    let report = submitter_report(&source, &args.source_project, args.common.limit()).await?;
    print!("{report}");
    Ok(())
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary, json: bool) {
    if json {
        match serde_json::to_string_pretty(summary) {
            Ok(json) => println!("{json}"),
            Err(e) => error!(error = %e, "Failed to serialize summary"),
        }
        return;
    }

    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    for line in summary.to_string().lines() {
        println!("  {line}");
    }
}
