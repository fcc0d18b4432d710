//! Orchestrates an issue transfer.

mod error;

pub use error::RunnerError;

use crate::config::TransferConfig;
use crate::fetch::fetch_issues;
use crate::plan::{plan_transfer, TransferPlan};
use crate::policy::report_fatal;
use crate::rate_limit::RateGovernor;
use crate::replicate::Replicator;
use crate::summary::{IssueOutcome, RunSummary};
use crate::tracker::{GitHubTracker, IssueTracker, TrackerError};
use tracing::info;

/// Runs a transfer from the source to the destination repository.
pub struct Runner {
    config: TransferConfig,
    source: Box<dyn IssueTracker>,
    destination: Box<dyn IssueTracker>,
    governor: RateGovernor,
}

impl Runner {
    /// Builds a runner talking to GitHub with the configured tokens.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Client`] if a client cannot be constructed.
    pub fn new(config: TransferConfig) -> Result<Self, RunnerError> {
        let source =
            GitHubTracker::new(config.source(), config.api_base()).map_err(RunnerError::Client)?;
        let destination = GitHubTracker::new(config.destination(), config.api_base())
            .map_err(RunnerError::Client)?;

        Ok(Self::with_trackers(
            config,
            Box::new(source),
            Box::new(destination),
        ))
    }

    /// Builds a runner on top of existing trackers.
    pub fn with_trackers(
        config: TransferConfig,
        source: Box<dyn IssueTracker>,
        destination: Box<dyn IssueTracker>,
    ) -> Self {
        Self {
            config,
            source,
            destination,
            governor: RateGovernor::new(),
        }
    }

    /// Replaces the rate governor.
    pub fn with_governor(mut self, governor: RateGovernor) -> Self {
        self.governor = governor;
        self
    }

    /// Returns the configuration of this runner.
    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    /// Executes the full transfer.
    ///
    /// Source and destination issues are listed, the missing ones planned and
    /// then replicated in source order. In dry-run mode the plan is printed
    /// and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Fetch`] if a listing fails, or
    /// [`RunnerError::Aborted`] with the partial summary if replication stops.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(self.config.dry_run());
        let retry = self.config.retry();

        info!(
            source = %self.source.repository(),
            destination = %self.destination.repository(),
            dry_run = self.config.dry_run(),
            "Starting transfer"
        );

        let source_issues = fetch_issues(self.source.as_ref(), retry)
            .await
            .map_err(|e| fetch_failed(self.source.as_ref(), e))?;
        let destination_issues = fetch_issues(self.destination.as_ref(), retry)
            .await
            .map_err(|e| fetch_failed(self.destination.as_ref(), e))?;

        summary.source_issues = source_issues.len();
        summary.destination_issues = destination_issues.len();

        let plan = plan_transfer(&source_issues, &destination_issues);
        summary.planned = plan.len();
        summary.skipped = plan.skipped();
        info!(
            count = plan.len(),
            skipped = plan.skipped(),
            "Issues to transfer"
        );

        if plan.is_empty() {
            return Ok(summary);
        }

        if self.config.dry_run() {
            print_dry_run_preview(&plan, self.destination.as_ref());
            for issue in &plan {
                summary.record(IssueOutcome::Planned {
                    source_number: issue.number,
                    title: issue.title.clone(),
                    state: issue.state.clone(),
                    comments: issue.comments,
                });
            }
            return Ok(summary);
        }

        let replicator = Replicator::new(
            self.source.as_ref(),
            self.destination.as_ref(),
            self.governor,
            retry,
        );

        if let Err(e) = replicator.replicate_plan(&plan, &mut summary).await {
            report_fatal(e.step(), e.tracker_error());
            return Err(RunnerError::Aborted {
                summary: Box::new(summary),
                source: e,
            });
        }

        Ok(summary)
    }
}

fn fetch_failed(tracker: &dyn IssueTracker, error: TrackerError) -> RunnerError {
    report_fatal("fetch issues", &error);
    RunnerError::Fetch {
        repository: tracker.repository().full_name(),
        source: error,
    }
}

fn print_dry_run_preview(plan: &TransferPlan, destination: &dyn IssueTracker) {
    println!("\n[DRY RUN] Destination: {}", destination.repository());
    println!(
        "  {} issue(s) to transfer, {} already present:\n",
        plan.len(),
        plan.skipped()
    );

    for (i, issue) in plan.iter().enumerate() {
        println!("  [{}/{}] #{} {}", i + 1, plan.len(), issue.number, issue.title);
        if issue.needs_state_patch() {
            println!(
                "    Would set state: {} ({})",
                issue.state,
                issue.state_reason.as_deref().unwrap_or("no reason")
            );
        }
        if issue.comments > 0 {
            println!("    Would copy {} comment(s)", issue.comments);
        }
    }

    println!();
}
