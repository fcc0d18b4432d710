//! Repository references.

use super::ConfigError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// A repository in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepoRef {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,
}

impl RepoRef {
    /// Creates a reference from its parts.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Returns the full name in `owner/name` format.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoRef {
    type Err = ConfigError;

    /// Parses `owner/name` or a web URL such as `https://github.com/owner/name`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let invalid = |reason: &str| ConfigError::InvalidRepository {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let path = if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
            let url = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;
            url.path().trim_matches('/').to_string()
        } else {
            trimmed.trim_matches('/').to_string()
        };

        let mut parts = path.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                let name = name.strip_suffix(".git").unwrap_or(name);
                if name.is_empty() {
                    return Err(invalid("repository name is empty"));
                }
                Ok(Self::new(owner, name))
            }
            _ => Err(invalid("expected 'owner/repo'")),
        }
    }
}
