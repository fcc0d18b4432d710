//! Transfer configuration.
//!
//! The configuration is built once at startup (see [`TransferSettings`]) and
//! is read-only afterwards.

mod error;
mod repository;
mod settings;

pub use error::ConfigError;
pub use repository::RepoRef;
pub use settings::{
    TransferSettings, API_URL_ENV, DEFAULT_API_URL, FROM_REPO_ENV, FROM_TOKEN_ENV, TO_REPO_ENV,
    TO_TOKEN_ENV,
};

use crate::retry::RetryPolicy;
use std::fmt;
use url::Url;

/// A repository together with the token used to access it.
#[derive(Clone)]
pub struct Endpoint {
    repository: RepoRef,
    token: String,
}

impl Endpoint {
    /// Creates a new endpoint.
    pub fn new(repository: RepoRef, token: impl Into<String>) -> Self {
        Self {
            repository,
            token: token.into(),
        }
    }

    /// Returns the repository.
    pub fn repository(&self) -> &RepoRef {
        &self.repository
    }

    /// Returns the access token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("repository", &self.repository)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Configuration for a single transfer run.
#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// Repository issues are copied from.
    source: Endpoint,
    /// Repository issues are copied to.
    destination: Endpoint,
    /// Base URL of the REST API, without a trailing slash.
    api_base: String,
    /// Whether to only report the plan.
    dry_run: bool,
    /// Retry policy applied to every request.
    retry: RetryPolicy,
}

impl TransferConfig {
    /// Creates a configuration with default API URL, retry policy and dry run disabled.
    pub fn new(source: Endpoint, destination: Endpoint) -> Self {
        Self {
            source,
            destination,
            api_base: DEFAULT_API_URL.to_string(),
            dry_run: false,
            retry: RetryPolicy::default(),
        }
    }

    /// Sets the API base URL.
    pub fn with_api_base(mut self, api_base: &Url) -> Self {
        self.api_base = api_base.as_str().trim_end_matches('/').to_string();
        self
    }

    /// Enables or disables dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Returns the source endpoint.
    pub fn source(&self) -> &Endpoint {
        &self.source
    }

    /// Returns the destination endpoint.
    pub fn destination(&self) -> &Endpoint {
        &self.destination
    }

    /// Returns the API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the retry policy.
    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }
}
