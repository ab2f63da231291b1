//! Error types for the dispatch library itself.
//!
//! Dispatching never fails; these errors only come from configuration time:
//! compiling message patterns and loading [`DispatchConfig`](crate::config::DispatchConfig).

use config::ConfigError;
use thiserror::Error;

/// Errors that can occur while configuring a handler.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A message pattern could not be compiled.
    #[error("invalid message pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The configuration file was not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// The configuration file path is not valid UTF-8.
    #[error("invalid configuration path: {0}")]
    InvalidConfigPath(String),

    /// The configuration could not be parsed or deserialized.
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for configuration-time operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_display() {
        let err = DispatchError::from(regex::Regex::new("(unclosed").unwrap_err());
        assert!(err.to_string().starts_with("invalid message pattern:"));
    }

    #[test]
    fn test_config_not_found_display() {
        let err = DispatchError::ConfigNotFound("dispatch.toml".to_string());
        assert_eq!(err.to_string(), "configuration file not found: dispatch.toml");
    }
}
