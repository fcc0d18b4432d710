//! Access to a remote issue tracker.
//!
//! [`IssueTracker`] is the seam between the transfer engine and the network.
//! [`GitHubTracker`] talks to the GitHub REST API through octocrab; tests
//! substitute in-memory implementations.

mod error;
mod github;

pub use error::TrackerError;
pub use github::GitHubTracker;

use crate::config::RepoRef;
use crate::types::{
    Comment, CreatedComment, Issue, IssueHandle, IssueStatePatch, NewComment, NewIssue,
};
use async_trait::async_trait;

/// Operations the transfer needs from a single repository.
///
/// List operations return one page; pages are numbered from 1.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Repository this tracker operates on.
    fn repository(&self) -> &RepoRef;

    /// Lists one page of issues in any state.
    async fn list_issues(&self, page: u32, per_page: u8) -> Result<Vec<Issue>, TrackerError>;

    /// Lists one page of comments on an issue.
    async fn list_comments(
        &self,
        issue_number: u64,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<Comment>, TrackerError>;

    /// Creates an issue and returns its handle.
    async fn create_issue(&self, issue: &NewIssue) -> Result<IssueHandle, TrackerError>;

    /// Changes the state of an existing issue.
    async fn update_issue_state(
        &self,
        issue_number: u64,
        patch: &IssueStatePatch,
    ) -> Result<IssueHandle, TrackerError>;

    /// Adds a comment to an existing issue.
    async fn create_comment(
        &self,
        issue_number: u64,
        comment: &NewComment,
    ) -> Result<CreatedComment, TrackerError>;
}
