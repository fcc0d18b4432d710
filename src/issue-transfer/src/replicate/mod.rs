//! Issue replication.
//!
//! Copies planned issues to the destination one at a time: create the issue,
//! restore its state, then replay its comments in order. Every mutating call
//! is followed by the governed delay.

mod error;
mod replicated_issue;

pub use error::ReplicationError;
pub use replicated_issue::ReplicatedIssue;

use crate::fetch::fetch_comments;
use crate::plan::TransferPlan;
use crate::rate_limit::RateGovernor;
use crate::retry::RetryPolicy;
use crate::summary::{IssueOutcome, RunSummary};
use crate::tracker::IssueTracker;
use crate::types::{Issue, NewComment};
use tracing::{debug, info, info_span, warn, Instrument};

/// Copies issues from a source tracker to a destination tracker.
pub struct Replicator<'a> {
    source: &'a dyn IssueTracker,
    destination: &'a dyn IssueTracker,
    governor: RateGovernor,
    retry: &'a RetryPolicy,
}

impl<'a> Replicator<'a> {
    /// Creates a replicator.
    pub fn new(
        source: &'a dyn IssueTracker,
        destination: &'a dyn IssueTracker,
        governor: RateGovernor,
        retry: &'a RetryPolicy,
    ) -> Self {
        Self {
            source,
            destination,
            governor,
            retry,
        }
    }

    /// Replicates every planned issue in order, recording outcomes in `summary`.
    ///
    /// Stops at the first failure; issues after it are not attempted.
    ///
    /// # Errors
    ///
    /// Returns the [`ReplicationError`] that stopped the run.
    pub async fn replicate_plan(
        &self,
        plan: &TransferPlan,
        summary: &mut RunSummary,
    ) -> Result<(), ReplicationError> {
        for (index, issue) in plan.iter().enumerate() {
            info!(
                position = index + 1,
                total = plan.len(),
                title = %issue.title,
                "Replicating issue"
            );

            match self.replicate_issue(issue).await {
                Ok(replicated) => summary.record(IssueOutcome::Replicated(replicated)),
                Err(e) => {
                    if e.destination_number().is_some() {
                        warn!(
                            title = %issue.title,
                            "Issue was created but is incomplete; it will not be revisited on re-run"
                        );
                    }
                    summary.record(IssueOutcome::Failed {
                        source_number: issue.number,
                        title: issue.title.clone(),
                        destination_number: e.destination_number(),
                        error: e.to_string(),
                    });
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// Copies a single issue with its state and comments.
    ///
    /// This function:
    /// 1. Creates the issue with its title, body, labels and assignees
    /// 2. Patches the state if the source issue is not open
    /// 3. Replays the comments of the source issue in order
    ///
    /// Creations are sent once. A create that fails on the server may still
    /// have taken effect, so repeating it could duplicate content. Listings
    /// and the state patch go through the retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ReplicationError`] naming the step that failed. Anything
    /// created before the failure stays at the destination.
    pub async fn replicate_issue(&self, issue: &Issue) -> Result<ReplicatedIssue, ReplicationError> {
        let span = info_span!(
            "replicate_issue",
            source_number = issue.number,
            title = %issue.title
        );

        async {
            let new_issue = issue.to_new_issue();
            let handle = self
                .destination
                .create_issue(&new_issue)
                .await
                .map_err(|source| ReplicationError::CreateIssue {
                    title: issue.title.clone(),
                    source,
                })?;
            info!(
                issue_number = handle.number,
                url = handle.html_url.as_deref().unwrap_or_default(),
                "Created issue"
            );
            self.governor.pause().await;

            let mut state_patched = false;
            if issue.needs_state_patch() {
                let patch = issue.to_state_patch();
                info!(
                    state = %patch.state,
                    state_reason = patch.state_reason.as_deref().unwrap_or_default(),
                    "Patching issue state"
                );
                self.retry
                    .execute("patch issue state", || {
                        self.destination.update_issue_state(handle.number, &patch)
                    })
                    .await
                    .map_err(|source| ReplicationError::PatchState {
                        title: issue.title.clone(),
                        number: handle.number,
                        source,
                    })?;
                self.governor.pause().await;
                state_patched = true;
            }

            let mut comments_copied = 0;
            if issue.comments > 0 {
                let comments = fetch_comments(self.source, self.retry, issue.number)
                    .await
                    .map_err(|source| ReplicationError::FetchComments {
                        title: issue.title.clone(),
                        source_number: issue.number,
                        number: handle.number,
                        source,
                    })?;

                for (index, comment) in comments.iter().enumerate() {
                    let new_comment = NewComment::from(comment);
                    let created = self
                        .destination
                        .create_comment(handle.number, &new_comment)
                        .await
                        .map_err(|source| ReplicationError::CreateComment {
                            title: issue.title.clone(),
                            number: handle.number,
                            position: index + 1,
                            source,
                        })?;
                    debug!(
                        comment_id = created.id,
                        position = index + 1,
                        "Created comment"
                    );
                    comments_copied += 1;
                    self.governor.pause().await;
                }
            }

            info!(state_patched, comments_copied, "Issue replicated");
            self.governor.pause().await;

            Ok(ReplicatedIssue {
                source_number: issue.number,
                title: issue.title.clone(),
                handle,
                state_patched,
                comments_copied,
            })
        }
        .instrument(span)
        .await
    }
}
