//! GitHub REST implementation of [`IssueTracker`].

use super::{IssueTracker, TrackerError};
use crate::config::{Endpoint, RepoRef};
use crate::types::{
    Comment, CreatedComment, Issue, IssueHandle, IssueStatePatch, NewComment, NewIssue,
};
use async_trait::async_trait;
use http::header::ACCEPT;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::Serialize;
use tracing::debug;

/// Media type requesting every body representation of issues and comments.
const FULL_MEDIA_TYPE: &str = "application/vnd.github.full+json";

/// Query for listing issues.
#[derive(Serialize)]
struct IssueListParams {
    state: &'static str,
    per_page: u8,
    page: u32,
}

/// Query for listing comments.
#[derive(Serialize)]
struct CommentListParams {
    per_page: u8,
    page: u32,
}

/// Issue tracker backed by a GitHub repository.
#[derive(Clone)]
pub struct GitHubTracker {
    octocrab: Octocrab,
    repository: RepoRef,
}

impl GitHubTracker {
    /// Builds an authenticated client for the given endpoint.
    ///
    /// Octocrab's own retry layer is disabled: every request is sent exactly
    /// once and [`RetryPolicy`](crate::RetryPolicy) decides what is repeated.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] if the client cannot be constructed.
    pub fn new(endpoint: &Endpoint, api_base: &str) -> Result<Self, TrackerError> {
        let octocrab = Octocrab::builder()
            .add_retry_config(RetryConfig::None)
            .personal_token(endpoint.token().to_string())
            .base_uri(api_base)?
            .add_header(ACCEPT, FULL_MEDIA_TYPE.to_string())
            .build()?;

        Ok(Self::from_octocrab(octocrab, endpoint.repository().clone()))
    }

    /// Wraps an existing client.
    pub fn from_octocrab(octocrab: Octocrab, repository: RepoRef) -> Self {
        Self {
            octocrab,
            repository,
        }
    }

    fn issues_route(&self) -> String {
        format!(
            "/repos/{}/{}/issues",
            self.repository.owner, self.repository.name
        )
    }

    fn issue_route(&self, issue_number: u64) -> String {
        format!("{}/{issue_number}", self.issues_route())
    }

    fn comments_route(&self, issue_number: u64) -> String {
        format!("{}/comments", self.issue_route(issue_number))
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    fn repository(&self) -> &RepoRef {
        &self.repository
    }

    async fn list_issues(&self, page: u32, per_page: u8) -> Result<Vec<Issue>, TrackerError> {
        debug!(repo = %self.repository, page, "Listing issues");
        let params = IssueListParams {
            state: "all",
            per_page,
            page,
        };
        let issues: Vec<Issue> = self
            .octocrab
            .get(self.issues_route(), Some(&params))
            .await?;
        Ok(issues)
    }

    async fn list_comments(
        &self,
        issue_number: u64,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<Comment>, TrackerError> {
        debug!(repo = %self.repository, issue_number, page, "Listing comments");
        let params = CommentListParams { per_page, page };
        let comments: Vec<Comment> = self
            .octocrab
            .get(self.comments_route(issue_number), Some(&params))
            .await?;
        Ok(comments)
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<IssueHandle, TrackerError> {
        let handle: IssueHandle = self
            .octocrab
            .post(self.issues_route(), Some(issue))
            .await?;
        Ok(handle)
    }

    async fn update_issue_state(
        &self,
        issue_number: u64,
        patch: &IssueStatePatch,
    ) -> Result<IssueHandle, TrackerError> {
        let handle: IssueHandle = self
            .octocrab
            .patch(self.issue_route(issue_number), Some(patch))
            .await?;
        Ok(handle)
    }

    async fn create_comment(
        &self,
        issue_number: u64,
        comment: &NewComment,
    ) -> Result<CreatedComment, TrackerError> {
        let created: CreatedComment = self
            .octocrab
            .post(self.comments_route(issue_number), Some(comment))
            .await?;
        Ok(created)
    }
}
