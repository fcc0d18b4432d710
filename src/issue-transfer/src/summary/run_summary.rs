//! Run summary types.

use super::result::IssueOutcome;
use serde::Serialize;

/// Summary of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Whether this was a dry run.
    pub dry_run: bool,

    /// Number of issues found in the source repository.
    pub source_issues: usize,

    /// Number of issues found in the destination repository.
    pub destination_issues: usize,

    /// Number of issues missing at the destination.
    pub planned: usize,

    /// Number of source issues already present at the destination.
    pub skipped: usize,

    /// Number of issues created.
    pub created: usize,

    /// Number of created issues whose state was patched.
    pub state_patched: usize,

    /// Number of comments copied.
    pub comments_copied: usize,

    /// Number of issues whose replication failed.
    pub failed: usize,

    /// Outcome of every processed issue, in processing order.
    pub outcomes: Vec<IssueOutcome>,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with an issue outcome.
    pub fn record(&mut self, outcome: IssueOutcome) {
        match &outcome {
            IssueOutcome::Replicated(replicated) => {
                self.created += 1;
                if replicated.state_patched {
                    self.state_patched += 1;
                }
                self.comments_copied += replicated.comments_copied;
            }
            IssueOutcome::Planned { .. } => {}
            IssueOutcome::Failed {
                destination_number, ..
            } => {
                if destination_number.is_some() {
                    self.created += 1;
                }
                self.failed += 1;
            }
        }
        self.outcomes.push(outcome);
    }

    /// Returns the number of planned issues that were not processed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        if self.dry_run {
            return 0;
        }
        self.planned.saturating_sub(self.outcomes.len())
    }

    /// Returns true if any failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Returns true if every planned issue was processed successfully.
    #[must_use]
    pub fn all_success(&self) -> bool {
        self.failed == 0 && self.remaining() == 0
    }
}
