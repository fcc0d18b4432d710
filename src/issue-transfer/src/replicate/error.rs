//! Replication error types.

use crate::tracker::TrackerError;
use thiserror::Error;

/// Errors that stop the replication of an issue.
#[derive(Debug, Error)]
pub enum ReplicationError {
    /// The destination issue could not be created.
    #[error("Failed to create issue '{title}': {source}")]
    CreateIssue {
        title: String,
        #[source]
        source: TrackerError,
    },

    /// The state of the created issue could not be updated.
    #[error("Failed to update state of issue #{number} ('{title}'): {source}")]
    PatchState {
        title: String,
        number: u64,
        #[source]
        source: TrackerError,
    },

    /// The comments of the source issue could not be read.
    #[error("Failed to fetch comments of source issue #{source_number} ('{title}'): {source}")]
    FetchComments {
        title: String,
        source_number: u64,
        number: u64,
        #[source]
        source: TrackerError,
    },

    /// A comment could not be created.
    #[error("Failed to create comment {position} on issue #{number} ('{title}'): {source}")]
    CreateComment {
        title: String,
        number: u64,
        /// 1-based position of the comment in the source issue.
        position: usize,
        #[source]
        source: TrackerError,
    },
}

impl ReplicationError {
    /// Returns the underlying tracker failure.
    pub fn tracker_error(&self) -> &TrackerError {
        match self {
            Self::CreateIssue { source, .. }
            | Self::PatchState { source, .. }
            | Self::FetchComments { source, .. }
            | Self::CreateComment { source, .. } => source,
        }
    }

    /// Returns the number of the destination issue, if it was created.
    pub fn destination_number(&self) -> Option<u64> {
        match self {
            Self::CreateIssue { .. } => None,
            Self::PatchState { number, .. }
            | Self::FetchComments { number, .. }
            | Self::CreateComment { number, .. } => Some(*number),
        }
    }

    /// Short description of the failed step.
    pub fn step(&self) -> &'static str {
        match self {
            Self::CreateIssue { .. } => "create issue",
            Self::PatchState { .. } => "patch issue state",
            Self::FetchComments { .. } => "fetch comments",
            Self::CreateComment { .. } => "create comment",
        }
    }
}
