//! Tracker error types.

use thiserror::Error;

/// Errors returned by an issue tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The tracker answered with a non-success status.
    #[error("{message} (status {status})")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Provider error message.
        message: String,
        /// Provider-supplied error detail, if any.
        detail: Option<String>,
    },

    /// The request did not produce a response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl TrackerError {
    /// Returns the HTTP status code, if the tracker answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Returns the provider-supplied error detail, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } => detail.as_deref(),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Returns true if the addressed resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<octocrab::Error> for TrackerError {
    fn from(error: octocrab::Error) -> Self {
        match error {
            octocrab::Error::GitHub { source, .. } => {
                let detail = match (&source.errors, &source.documentation_url) {
                    (Some(errors), _) if !errors.is_empty() => {
                        serde_json::to_string(errors).ok()
                    }
                    (_, Some(url)) => Some(url.clone()),
                    _ => None,
                };
                Self::Api {
                    status: source.status_code.as_u16(),
                    message: source.message.clone(),
                    detail,
                }
            }
            octocrab::Error::Serde { .. } | octocrab::Error::Json { .. } => {
                Self::Decode(error.to_string())
            }
            other => Self::Transport(other.to_string()),
        }
    }
}
