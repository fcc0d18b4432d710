//! Replicated issue information.

use crate::types::IssueHandle;
use serde::Serialize;

/// An issue fully copied to the destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplicatedIssue {
    /// Number of the issue in the source repository.
    pub source_number: u64,

    /// Issue title.
    pub title: String,

    /// Handle of the created destination issue.
    pub handle: IssueHandle,

    /// Whether the state was patched after creation.
    pub state_patched: bool,

    /// Number of comments copied.
    pub comments_copied: usize,
}
