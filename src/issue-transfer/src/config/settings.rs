//! Layered transfer settings.
//!
//! Settings are collected from a TOML file, the environment and the command
//! line, then merged and validated into a [`TransferConfig`].

use super::{ConfigError, Endpoint, RepoRef, TransferConfig};
use crate::retry::RetryPolicy;
use serde::Deserialize;
use std::path::Path;
use url::Url;

/// Default GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Environment variable holding the source repository.
pub const FROM_REPO_ENV: &str = "GITHUB_FROM_REPO_URL";
/// Environment variable holding the destination repository.
pub const TO_REPO_ENV: &str = "GITHUB_TO_REPO_URL";
/// Environment variable holding the source token.
pub const FROM_TOKEN_ENV: &str = "GITHUB_FROM_TOKEN";
/// Environment variable holding the destination token.
pub const TO_TOKEN_ENV: &str = "GITHUB_TO_TOKEN";
/// Environment variable holding the API URL.
pub const API_URL_ENV: &str = "GITHUB_API_URL";

/// Partially specified settings. Every field is optional until [`build`](Self::build).
///
/// The TOML form uses kebab-case keys:
///
/// ```toml
/// from = "octo-org/old-repo"
/// to = "octo-org/new-repo"
/// from-token = "ghp_..."
/// to-token = "ghp_..."
/// api-url = "https://api.github.com"
/// dry-run = false
/// max-attempts = 3
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TransferSettings {
    pub from: Option<String>,
    pub to: Option<String>,
    pub from_token: Option<String>,
    pub to_token: Option<String>,
    pub api_url: Option<String>,
    pub dry_run: Option<bool>,
    pub max_attempts: Option<u32>,
}

impl TransferSettings {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Reads settings from the `GITHUB_*` environment variables.
    ///
    /// Empty variables count as unset.
    pub fn from_env() -> Self {
        Self {
            from: read_env(FROM_REPO_ENV),
            to: read_env(TO_REPO_ENV),
            from_token: read_env(FROM_TOKEN_ENV),
            to_token: read_env(TO_TOKEN_ENV),
            api_url: read_env(API_URL_ENV),
            dry_run: None,
            max_attempts: None,
        }
    }

    /// Overlays `overrides` on top of `self`; set fields in `overrides` win.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            from: overrides.from.or(self.from),
            to: overrides.to.or(self.to),
            from_token: overrides.from_token.or(self.from_token),
            to_token: overrides.to_token.or(self.to_token),
            api_url: overrides.api_url.or(self.api_url),
            dry_run: overrides.dry_run.or(self.dry_run),
            max_attempts: overrides.max_attempts.or(self.max_attempts),
        }
    }

    /// Validates the settings and builds the final configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a repository or token is missing, or a
    /// value cannot be parsed.
    pub fn build(self) -> Result<TransferConfig, ConfigError> {
        let source_repo = parse_repository(self.from, "source")?;
        let destination_repo = parse_repository(self.to, "destination")?;

        let source_token = require_token(self.from_token, "source")?;
        let destination_token = require_token(self.to_token, "destination")?;

        let api_url = self.api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_base = Url::parse(&api_url).map_err(|e| ConfigError::InvalidApiUrl {
            value: api_url.clone(),
            source: e,
        })?;

        let retry = match self.max_attempts {
            Some(0) => {
                return Err(ConfigError::ValidationError {
                    message: "max-attempts must be at least 1".to_string(),
                })
            }
            Some(attempts) => RetryPolicy::default().with_max_attempts(attempts),
            None => RetryPolicy::default(),
        };

        Ok(TransferConfig::new(
            Endpoint::new(source_repo, source_token),
            Endpoint::new(destination_repo, destination_token),
        )
        .with_api_base(&api_base)
        .with_dry_run(self.dry_run.unwrap_or(false))
        .with_retry(retry))
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_repository(value: Option<String>, role: &'static str) -> Result<RepoRef, ConfigError> {
    match value {
        Some(value) if !value.trim().is_empty() => value.parse(),
        _ => Err(ConfigError::MissingRepository { role }),
    }
}

fn require_token(value: Option<String>, role: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|token| !token.trim().is_empty())
        .ok_or(ConfigError::MissingToken { role })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn complete() -> TransferSettings {
        TransferSettings {
            from: Some("octo-org/old".to_string()),
            to: Some("octo-org/new".to_string()),
            from_token: Some("from-token".to_string()),
            to_token: Some("to-token".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn can_build_with_defaults() {
        let config = complete().build().unwrap();

        assert_eq!(config.source().repository().full_name(), "octo-org/old");
        assert_eq!(config.destination().repository().full_name(), "octo-org/new");
        assert_eq!(config.source().token(), "from-token");
        assert_eq!(config.api_base(), "https://api.github.com");
        assert!(!config.dry_run());
        assert_eq!(config.retry().max_attempts, 3);
    }

    #[test]
    fn missing_repository_is_rejected() {
        let settings = TransferSettings {
            to: None,
            ..complete()
        };

        let result = settings.build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRepository {
                role: "destination"
            })
        ));
    }

    #[test]
    fn blank_token_is_rejected() {
        let settings = TransferSettings {
            from_token: Some("  ".to_string()),
            ..complete()
        };

        assert!(matches!(
            settings.build(),
            Err(ConfigError::MissingToken { role: "source" })
        ));
    }

    #[test]
    fn zero_attempts_is_rejected() {
        let settings = TransferSettings {
            max_attempts: Some(0),
            ..complete()
        };

        assert!(matches!(
            settings.build(),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn overrides_win_when_merged() {
        let base = complete();
        let overrides = TransferSettings {
            to: Some("other/repo".to_string()),
            dry_run: Some(true),
            ..Default::default()
        };

        let merged = base.merge(overrides);
        assert_eq!(merged.from.as_deref(), Some("octo-org/old"));
        assert_eq!(merged.to.as_deref(), Some("other/repo"));
        assert_eq!(merged.dry_run, Some(true));
    }

    #[test]
    fn can_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("transfer.toml");
        fs::write(
            &path,
            r#"
from = "octo-org/old"
to = "https://github.com/octo-org/new"
from-token = "a"
to-token = "b"
max-attempts = 5
"#,
        )
        .unwrap();

        let config = TransferSettings::from_file(&path).unwrap().build().unwrap();
        assert_eq!(config.destination().repository().name, "new");
        assert_eq!(config.retry().max_attempts, 5);
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("transfer.toml");
        fs::write(&path, "form = \"typo/repo\"\n").unwrap();

        let result = TransferSettings::from_file(&path);
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn missing_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let result = TransferSettings::from_file(&temp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }

    #[test]
    fn can_read_environment() {
        temp_env::with_vars(
            [
                (FROM_REPO_ENV, Some("env-org/old")),
                (TO_REPO_ENV, Some("env-org/new")),
                (FROM_TOKEN_ENV, Some("t1")),
                (TO_TOKEN_ENV, Some("")),
                (API_URL_ENV, None),
            ],
            || {
                let settings = TransferSettings::from_env();
                assert_eq!(settings.from.as_deref(), Some("env-org/old"));
                assert_eq!(settings.to.as_deref(), Some("env-org/new"));
                assert_eq!(settings.from_token.as_deref(), Some("t1"));
                assert_eq!(settings.to_token, None);
                assert_eq!(settings.api_url, None);
            },
        );
    }
}
