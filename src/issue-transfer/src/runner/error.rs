//! Runner error types.

use crate::replicate::ReplicationError;
use crate::summary::RunSummary;
use crate::tracker::TrackerError;

/// Errors that can occur while running a transfer.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error("Failed to build API client: {0}")]
    Client(#[source] TrackerError),

    /// An issue listing could not be read.
    #[error("Failed to fetch issues from {repository}: {source}")]
    Fetch {
        repository: String,
        #[source]
        source: TrackerError,
    },

    /// Replication stopped part-way through the plan.
    #[error("Transfer aborted: {source}")]
    Aborted {
        /// What had been done before the failure.
        summary: Box<RunSummary>,
        #[source]
        source: ReplicationError,
    },
}

impl RunnerError {
    /// Returns the partial summary of an aborted run.
    pub fn summary(&self) -> Option<&RunSummary> {
        match self {
            Self::Aborted { summary, .. } => Some(summary),
            _ => None,
        }
    }
}
