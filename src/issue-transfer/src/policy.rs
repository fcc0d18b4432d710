//! Failure classification.
//!
//! Decides what a failed request means for the run: a missing collection is
//! read as empty, transient failures may be retried, and everything else
//! aborts the transfer.

use crate::tracker::TrackerError;
use tracing::{error, warn};

/// How a failed request is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The resource does not exist (404).
    NotFound,

    /// Rate limited (429), server error (5xx) or no response at all.
    Transient,

    /// Any other failure.
    Fatal,
}

/// Classifies a tracker failure.
pub fn classify(error: &TrackerError) -> FailureKind {
    match error {
        TrackerError::Api { status: 404, .. } => FailureKind::NotFound,
        TrackerError::Api { status, .. } if *status == 429 || (500..600).contains(status) => {
            FailureKind::Transient
        }
        TrackerError::Api { .. } => FailureKind::Fatal,
        TrackerError::Transport(_) => FailureKind::Transient,
        TrackerError::Decode(_) => FailureKind::Fatal,
    }
}

/// Reads a missing collection as an empty one.
///
/// Only used for reads; a 404 on a write is fatal like any other failure.
pub fn recover_not_found<T: Default>(
    result: Result<T, TrackerError>,
    what: &str,
) -> Result<T, TrackerError> {
    match result {
        Err(e) if classify(&e) == FailureKind::NotFound => {
            warn!(what, error = %e, "Not found, treating as empty");
            Ok(T::default())
        }
        other => other,
    }
}

/// Logs a failure that aborts the run.
pub fn report_fatal(what: &str, error: &TrackerError) {
    error!(
        what,
        error = %error,
        status = ?error.status(),
        detail = error.detail().unwrap_or("none"),
        "Request failed, aborting transfer"
    );
}
