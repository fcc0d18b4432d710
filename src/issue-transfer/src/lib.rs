#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod fetch;
pub mod plan;
pub mod policy;
pub mod rate_limit;
pub mod replicate;
pub mod retry;
pub mod runner;
pub mod summary;
pub mod tracker;
pub mod types;

pub use config::{ConfigError, Endpoint, RepoRef, TransferConfig, TransferSettings};
pub use fetch::{fetch_all, fetch_comments, fetch_issues, PER_PAGE};
pub use plan::{plan_transfer, TransferPlan};
pub use policy::{classify, recover_not_found, report_fatal, FailureKind};
pub use rate_limit::{RateGovernor, GOVERNED_DELAY};
pub use replicate::{ReplicatedIssue, ReplicationError, Replicator};
pub use retry::RetryPolicy;
pub use runner::{Runner, RunnerError};
pub use summary::{IssueOutcome, RunSummary};
pub use tracker::{GitHubTracker, IssueTracker, TrackerError};
pub use types::{
    Assignee, Comment, CreatedComment, Issue, IssueHandle, IssueState, IssueStatePatch, Label,
    NewComment, NewIssue,
};
