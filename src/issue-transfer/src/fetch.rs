//! Paginated collection fetching.
//!
//! List endpoints are read page by page until a page shorter than
//! [`PER_PAGE`] comes back. A missing collection reads as empty.

use crate::policy::recover_not_found;
use crate::retry::RetryPolicy;
use crate::tracker::{IssueTracker, TrackerError};
use crate::types::{Comment, Issue};
use std::future::Future;
use tracing::{debug, info, info_span, Instrument};

/// Page size requested from list endpoints.
pub const PER_PAGE: u8 = 100;

/// Fetches every page of a collection, in order.
///
/// `fetch_page` is called with page numbers 1, 2, 3… A page holding fewer
/// than [`PER_PAGE`] items (including none) ends the collection; a full page
/// always causes one more request. Each page request goes through `retry`.
///
/// # Errors
///
/// Returns the first failure other than not-found. A not-found failure on
/// any page yields an empty collection.
pub async fn fetch_all<T, F, Fut>(
    what: &str,
    retry: &RetryPolicy,
    fetch_page: F,
) -> Result<Vec<T>, TrackerError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, TrackerError>>,
{
    recover_not_found(collect_pages(what, retry, fetch_page).await, what)
}

async fn collect_pages<T, F, Fut>(
    what: &str,
    retry: &RetryPolicy,
    mut fetch_page: F,
) -> Result<Vec<T>, TrackerError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, TrackerError>>,
{
    let mut items = Vec::new();
    let mut page = 1;

    loop {
        let batch = retry.execute(what, || fetch_page(page)).await?;
        let len = batch.len();
        debug!(what, page, len, "Fetched page");
        items.extend(batch);

        if len < usize::from(PER_PAGE) {
            return Ok(items);
        }
        page += 1;
    }
}

/// Fetches all issues of a repository, in any state.
///
/// # Errors
///
/// See [`fetch_all`].
pub async fn fetch_issues(
    tracker: &dyn IssueTracker,
    retry: &RetryPolicy,
) -> Result<Vec<Issue>, TrackerError> {
    let span = info_span!("fetch_issues", repo = %tracker.repository());

    async {
        let issues = fetch_all("issues", retry, |page| tracker.list_issues(page, PER_PAGE)).await?;

        info!(count = issues.len(), "Fetched issues");
        debug!(
            titles = ?issues.iter().map(|issue| issue.title.as_str()).collect::<Vec<_>>(),
            "Issue titles"
        );
        Ok(issues)
    }
    .instrument(span)
    .await
}

/// Fetches all comments of an issue, in order.
///
/// # Errors
///
/// See [`fetch_all`].
pub async fn fetch_comments(
    tracker: &dyn IssueTracker,
    retry: &RetryPolicy,
    issue_number: u64,
) -> Result<Vec<Comment>, TrackerError> {
    let span = info_span!(
        "fetch_comments",
        repo = %tracker.repository(),
        issue_number
    );

    async {
        let comments = fetch_all("comments", retry, |page| {
            tracker.list_comments(issue_number, page, PER_PAGE)
        })
        .await?;

        info!(count = comments.len(), "Fetched comments");
        debug!(
            bodies = ?comments
                .iter()
                .map(|comment| comment.body.as_deref().unwrap_or_default())
                .collect::<Vec<_>>(),
            "Comment bodies"
        );
        Ok(comments)
    }
    .instrument(span)
    .await
}
