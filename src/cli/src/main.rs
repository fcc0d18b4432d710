//! CLI for Issue Transfer.
//!
//! Copies the issues of one GitHub repository, with their state and
//! comments, into another repository.

use clap::Parser;
use issue_transfer::{RunSummary, Runner, RunnerError, TransferSettings};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Issue Transfer - Copy issues, their state and their comments between GitHub repositories.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Source repository (`owner/repo`). Overrides GITHUB_FROM_REPO_URL.
    #[arg(long)]
    from: Option<String>,

    /// Destination repository (`owner/repo`). Overrides GITHUB_TO_REPO_URL.
    #[arg(long)]
    to: Option<String>,

    /// Token for the source repository. Overrides GITHUB_FROM_TOKEN.
    #[arg(long)]
    from_token: Option<String>,

    /// Token for the destination repository. Overrides GITHUB_TO_TOKEN.
    #[arg(long)]
    to_token: Option<String>,

    /// GitHub API URL. Overrides GITHUB_API_URL.
    #[arg(long)]
    api_url: Option<String>,

    /// Path to a TOML settings file.
    #[arg(long, env = "ISSUE_TRANSFER_CONFIG")]
    config: Option<PathBuf>,

    /// Print the issues that would be transferred without writing anything.
    #[arg(long)]
    dry_run: bool,

    /// Maximum attempts per request for transient failures.
    #[arg(long)]
    max_attempts: Option<u32>,
}

impl Args {
    /// Settings given on the command line; unset flags stay `None`.
    fn settings(&self) -> TransferSettings {
        TransferSettings {
            from: self.from.clone(),
            to: self.to.clone(),
            from_token: self.from_token.clone(),
            to_token: self.to_token.clone(),
            api_url: self.api_url.clone(),
            dry_run: self.dry_run.then_some(true),
            max_attempts: self.max_attempts,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // A provider must be selected before any TLS client is built.
    // Installing only fails when a process-wide provider already exists.
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .ok();

    // Parse arguments
    let args = Args::parse();

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::from(0)
        }
        Err(RunnerError::Config(e)) => {
            error!(error = %e, "Invalid configuration");
            ExitCode::from(2)
        }
        Err(e) => {
            if let Some(summary) = e.summary() {
                print_summary(summary);
            }
            error!(error = %e, "Critical failure");
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
///
/// Settings are layered: settings file, then environment, then flags.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let file_settings = match &args.config {
        Some(path) => TransferSettings::from_file(path)?,
        None => TransferSettings::default(),
    };

    let config = file_settings
        .merge(TransferSettings::from_env())
        .merge(args.settings())
        .build()?;

    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Source issues: {}", summary.source_issues);
    println!("  Destination issues: {}", summary.destination_issues);
    println!("  Already present: {}", summary.skipped);
    println!("  To transfer: {}", summary.planned);

    if !summary.dry_run {
        println!("  Issues created: {}", summary.created);
        println!("  States patched: {}", summary.state_patched);
        println!("  Comments copied: {}", summary.comments_copied);
        println!("  Issues failed: {}", summary.failed);
        println!("  Not attempted: {}", summary.remaining());
    }
}
