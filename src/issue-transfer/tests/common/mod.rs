//! In-memory issue tracker used by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use issue_transfer::{
    Comment, CreatedComment, Issue, IssueHandle, IssueState, IssueStatePatch, IssueTracker, Label,
    NewComment, NewIssue, RepoRef, TrackerError,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Kind of request made against the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    ListIssues,
    ListComments,
    CreateIssue,
    UpdateState,
    CreateComment,
}

/// A recorded request.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListIssues { page: u32 },
    ListComments { issue_number: u64, page: u32 },
    CreateIssue(NewIssue),
    UpdateState { issue_number: u64, patch: IssueStatePatch },
    CreateComment { issue_number: u64, body: String },
}

impl Call {
    pub fn kind(&self) -> CallKind {
        match self {
            Self::ListIssues { .. } => CallKind::ListIssues,
            Self::ListComments { .. } => CallKind::ListComments,
            Self::CreateIssue(_) => CallKind::CreateIssue,
            Self::UpdateState { .. } => CallKind::UpdateState,
            Self::CreateComment { .. } => CallKind::CreateComment,
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(
            self.kind(),
            CallKind::CreateIssue | CallKind::UpdateState | CallKind::CreateComment
        )
    }
}

/// Fails calls of `kind` whose 1-based occurrence falls in `from..from + times`.
#[derive(Debug, Clone)]
struct ScriptedFailure {
    kind: CallKind,
    from: usize,
    times: usize,
    status: u16,
}

#[derive(Debug, Default)]
struct State {
    issues: Vec<Issue>,
    comments: HashMap<u64, Vec<Comment>>,
    calls: Vec<(Call, Instant)>,
    occurrences: HashMap<CallKind, usize>,
    failures: Vec<ScriptedFailure>,
    next_number: u64,
}

/// Tracker keeping its issues in memory. Clones share state.
#[derive(Debug, Clone)]
pub struct FakeTracker {
    repository: RepoRef,
    state: Arc<Mutex<State>>,
}

impl FakeTracker {
    pub fn new(full_name: &str) -> Self {
        Self {
            repository: full_name.parse().unwrap(),
            state: Arc::new(Mutex::new(State {
                next_number: 1000,
                ..Default::default()
            })),
        }
    }

    pub fn with_issues(self, issues: Vec<Issue>) -> Self {
        self.state.lock().unwrap().issues = issues;
        self
    }

    pub fn with_comments(self, issue_number: u64, bodies: &[Option<&str>]) -> Self {
        let comments = bodies
            .iter()
            .map(|body| Comment {
                body: body.map(str::to_string),
            })
            .collect();
        self.state
            .lock()
            .unwrap()
            .comments
            .insert(issue_number, comments);
        self
    }

    /// Fails the `nth` call of `kind` with `status`.
    pub fn fail_nth(self, kind: CallKind, nth: usize, status: u16) -> Self {
        self.fail_times(kind, nth, 1, status)
    }

    /// Fails `times` consecutive calls of `kind`, starting at the `from`th.
    pub fn fail_times(self, kind: CallKind, from: usize, times: usize, status: u16) -> Self {
        self.state.lock().unwrap().failures.push(ScriptedFailure {
            kind,
            from,
            times,
            status,
        });
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .map(|(call, _)| call.clone())
            .collect()
    }

    pub fn timed_calls(&self) -> Vec<(Call, Instant)> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_write).collect()
    }

    pub fn count(&self, kind: CallKind) -> usize {
        self.calls().iter().filter(|call| call.kind() == kind).count()
    }

    pub fn issues(&self) -> Vec<Issue> {
        self.state.lock().unwrap().issues.clone()
    }

    pub fn comments_of(&self, issue_number: u64) -> Vec<Comment> {
        self.state
            .lock()
            .unwrap()
            .comments
            .get(&issue_number)
            .cloned()
            .unwrap_or_default()
    }

    /// Records the call and returns the scripted failure for it, if any.
    fn record(&self, call: Call) -> Result<(), TrackerError> {
        let mut state = self.state.lock().unwrap();
        let kind = call.kind();
        state.calls.push((call, Instant::now()));

        let occurrence = {
            let count = state.occurrences.entry(kind).or_insert(0);
            *count += 1;
            *count
        };

        let failure = state.failures.iter().find(|failure| {
            failure.kind == kind
                && occurrence >= failure.from
                && occurrence < failure.from + failure.times
        });

        match failure {
            Some(failure) => Err(TrackerError::Api {
                status: failure.status,
                message: format!("scripted failure {}", failure.status),
                detail: None,
            }),
            None => Ok(()),
        }
    }
}

fn page_of<T: Clone>(items: &[T], page: u32, per_page: u8) -> Vec<T> {
    items
        .iter()
        .skip((page as usize - 1) * usize::from(per_page))
        .take(usize::from(per_page))
        .cloned()
        .collect()
}

#[async_trait]
impl IssueTracker for FakeTracker {
    fn repository(&self) -> &RepoRef {
        &self.repository
    }

    async fn list_issues(&self, page: u32, per_page: u8) -> Result<Vec<Issue>, TrackerError> {
        self.record(Call::ListIssues { page })?;
        Ok(page_of(&self.state.lock().unwrap().issues, page, per_page))
    }

    async fn list_comments(
        &self,
        issue_number: u64,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<Comment>, TrackerError> {
        self.record(Call::ListComments { issue_number, page })?;
        let state = self.state.lock().unwrap();
        match state.comments.get(&issue_number) {
            Some(comments) => Ok(page_of(comments, page, per_page)),
            None => Ok(Vec::new()),
        }
    }

    async fn create_issue(&self, new_issue: &NewIssue) -> Result<IssueHandle, TrackerError> {
        self.record(Call::CreateIssue(new_issue.clone()))?;

        let mut state = self.state.lock().unwrap();
        state.next_number += 1;
        let number = state.next_number;
        state.issues.push(Issue {
            number,
            title: new_issue.title.clone(),
            body: new_issue.body.clone(),
            labels: new_issue
                .labels
                .iter()
                .map(|name| Label { name: name.clone() })
                .collect(),
            ..issue(number, &new_issue.title)
        });

        Ok(IssueHandle {
            number,
            html_url: Some(format!(
                "https://github.com/{}/issues/{number}",
                self.repository
            )),
        })
    }

    async fn update_issue_state(
        &self,
        issue_number: u64,
        patch: &IssueStatePatch,
    ) -> Result<IssueHandle, TrackerError> {
        self.record(Call::UpdateState {
            issue_number,
            patch: patch.clone(),
        })?;

        let mut state = self.state.lock().unwrap();
        if let Some(issue) = state
            .issues
            .iter_mut()
            .find(|issue| issue.number == issue_number)
        {
            issue.state = patch.state.clone();
            issue.state_reason = patch.state_reason.clone();
        }

        Ok(IssueHandle {
            number: issue_number,
            html_url: None,
        })
    }

    async fn create_comment(
        &self,
        issue_number: u64,
        comment: &NewComment,
    ) -> Result<CreatedComment, TrackerError> {
        self.record(Call::CreateComment {
            issue_number,
            body: comment.body.clone(),
        })?;

        let mut state = self.state.lock().unwrap();
        let comments = state.comments.entry(issue_number).or_default();
        comments.push(Comment {
            body: Some(comment.body.clone()),
        });

        Ok(CreatedComment {
            id: comments.len() as u64,
            html_url: None,
        })
    }
}

/// An open issue without comments.
pub fn issue(number: u64, title: &str) -> Issue {
    Issue {
        number,
        title: title.to_string(),
        body: Some(format!("Body of {title}")),
        assignee: None,
        assignees: Vec::new(),
        labels: Vec::new(),
        state: IssueState::Open,
        state_reason: None,
        comments: 0,
        html_url: None,
    }
}

/// Asserts that `later` happened at least one governed delay after `earlier`.
pub fn assert_governed_gap(earlier: Instant, later: Instant) {
    let gap = later.duration_since(earlier);
    assert!(
        gap >= Duration::from_millis(1000),
        "expected a governed delay between calls, got {gap:?}"
    );
}
