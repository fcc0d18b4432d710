//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while building the transfer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A repository was not specified.
    #[error("The {role} repository is not specified")]
    MissingRepository { role: &'static str },

    /// A repository reference could not be parsed.
    #[error("Invalid repository '{value}': {reason}")]
    InvalidRepository { value: String, reason: String },

    /// A token was not specified.
    #[error("No token specified for the {role} repository")]
    MissingToken { role: &'static str },

    /// The API URL could not be parsed.
    #[error("Invalid API URL '{value}': {source}")]
    InvalidApiUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A setting has an unusable value.
    #[error("Validation error: {message}")]
    ValidationError { message: String },
}
