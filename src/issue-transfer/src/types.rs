//! Core types for issue transfers.
//!
//! This module contains the data structures exchanged with the issue tracker:
//! - [`Issue`] and [`Comment`] - content read from the source repository
//! - [`NewIssue`], [`IssueStatePatch`] and [`NewComment`] - write payloads
//! - [`IssueHandle`] and [`CreatedComment`] - what the destination returns

use serde::{Deserialize, Serialize};
use std::fmt;

/// A label attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label name.
    pub name: String,
}

/// A user assigned to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    /// User login.
    pub login: String,
}

/// Lifecycle state of an issue.
///
/// Anything other than `open` and `closed` is kept verbatim so it can be
/// replayed onto the destination unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueState {
    /// The default state of a freshly created issue.
    #[default]
    Open,

    /// Closed issue.
    Closed,

    /// Any other provider-defined state.
    Other(String),
}

impl IssueState {
    /// Returns the wire representation of the state.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Other(state) => state,
        }
    }

    /// Returns true for the state every created issue starts in.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl From<String> for IssueState {
    fn from(state: String) -> Self {
        match state.as_str() {
            "open" => Self::Open,
            "closed" => Self::Closed,
            _ => Self::Other(state),
        }
    }
}

impl From<IssueState> for String {
    fn from(state: IssueState) -> Self {
        match state {
            IssueState::Other(state) => state,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An issue as listed by the source repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number within its repository.
    pub number: u64,

    /// Issue title. Used to match issues across repositories.
    pub title: String,

    /// Issue body, if any.
    #[serde(default)]
    pub body: Option<String>,

    /// Primary assignee.
    #[serde(default)]
    pub assignee: Option<Assignee>,

    /// All assignees.
    #[serde(default)]
    pub assignees: Vec<Assignee>,

    /// Attached labels.
    #[serde(default)]
    pub labels: Vec<Label>,

    /// Lifecycle state.
    #[serde(default)]
    pub state: IssueState,

    /// Reason for the current state (e.g. `completed`, `not_planned`).
    #[serde(default)]
    pub state_reason: Option<String>,

    /// Number of comments on the issue.
    #[serde(default)]
    pub comments: u64,

    /// Web URL of the issue.
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Issue {
    /// Returns the names of all attached labels, in order.
    pub fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|label| label.name.clone()).collect()
    }

    /// Returns the logins of all assignees, in order.
    pub fn assignee_logins(&self) -> Vec<String> {
        self.assignees
            .iter()
            .map(|assignee| assignee.login.clone())
            .collect()
    }

    /// Returns true if a copy of this issue needs its state patched after creation.
    pub fn needs_state_patch(&self) -> bool {
        !self.state.is_open()
    }

    /// Builds the creation payload for a copy of this issue.
    pub fn to_new_issue(&self) -> NewIssue {
        NewIssue {
            title: self.title.clone(),
            body: self.body.clone(),
            labels: self.label_names(),
            assignees: self.assignee_logins(),
        }
    }

    /// Builds the state patch for a copy of this issue.
    pub fn to_state_patch(&self) -> IssueStatePatch {
        IssueStatePatch {
            state: self.state.clone(),
            state_reason: self.state_reason.clone(),
        }
    }
}

/// A comment on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment text, if any.
    #[serde(default)]
    pub body: Option<String>,
}

/// Payload for creating an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: Option<String>,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
}

/// Payload for changing the state of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueStatePatch {
    pub state: IssueState,
    pub state_reason: Option<String>,
}

/// Payload for creating a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComment {
    pub body: String,
}

impl From<&Comment> for NewComment {
    fn from(comment: &Comment) -> Self {
        Self {
            body: comment.body.clone().unwrap_or_default(),
        }
    }
}

/// Identifies an issue created at the destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueHandle {
    /// Issue number assigned by the destination.
    pub number: u64,

    /// Web URL of the created issue.
    #[serde(default)]
    pub html_url: Option<String>,
}

/// A comment created at the destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedComment {
    /// Comment identifier.
    pub id: u64,

    /// Web URL of the created comment.
    #[serde(default)]
    pub html_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn can_deserialize_github_issue() {
        let issue: Issue = serde_json::from_value(json!({
            "id": 1,
            "number": 42,
            "title": "Crash on start",
            "body": null,
            "assignee": { "login": "octocat", "id": 7 },
            "assignees": [{ "login": "octocat" }, { "login": "hubot" }],
            "labels": [{ "name": "bug", "color": "f00" }],
            "state": "closed",
            "state_reason": "not_planned",
            "comments": 3,
            "html_url": "https://github.com/o/r/issues/42"
        }))
        .unwrap();

        assert_eq!(issue.number, 42);
        assert_eq!(issue.body, None);
        assert_eq!(issue.state, IssueState::Closed);
        assert_eq!(issue.label_names(), vec!["bug"]);
        assert_eq!(issue.assignee_logins(), vec!["octocat", "hubot"]);
        assert!(issue.needs_state_patch());
    }

    #[test]
    fn unknown_state_is_kept_verbatim() {
        let state = IssueState::from("locked".to_string());
        assert_eq!(state, IssueState::Other("locked".to_string()));
        assert_eq!(String::from(state), "locked");
    }

    #[test]
    fn state_patch_serializes_as_strings() {
        let patch = IssueStatePatch {
            state: IssueState::Closed,
            state_reason: Some("not_planned".to_string()),
        };

        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "state": "closed", "state_reason": "not_planned" })
        );
    }

    #[test]
    fn missing_comment_body_becomes_empty() {
        let comment = Comment { body: None };
        assert_eq!(NewComment::from(&comment).body, "");
    }
}
