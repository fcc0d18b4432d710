//! Per-issue outcome types.

use crate::replicate::ReplicatedIssue;
use crate::types::IssueState;
use serde::Serialize;

/// Result of processing a single planned issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IssueOutcome {
    /// Issue copied with its state and comments.
    Replicated(ReplicatedIssue),

    /// Issue would be copied (dry run).
    Planned {
        /// Number of the issue in the source repository.
        source_number: u64,
        /// Issue title.
        title: String,
        /// Source state.
        state: IssueState,
        /// Number of comments that would be copied.
        comments: u64,
    },

    /// Replication failed and the run stopped.
    Failed {
        /// Number of the issue in the source repository.
        source_number: u64,
        /// Issue title.
        title: String,
        /// Number of the destination issue, if it had been created.
        destination_number: Option<u64>,
        /// Error message.
        error: String,
    },
}

impl IssueOutcome {
    /// Returns the title of the issue.
    pub fn title(&self) -> &str {
        match self {
            Self::Replicated(replicated) => &replicated.title,
            Self::Planned { title, .. } | Self::Failed { title, .. } => title,
        }
    }
}
