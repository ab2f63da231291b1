//! Regex predicates over an error's display text.
//!
//! Useful when the error type is opaque (a boxed `dyn Error`, an I/O error,
//! a message from another process) and the only reliable handle on it is
//! what it prints.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::DispatchResult;
use crate::handler::Predicate;

/// A compiled pattern matched against `error.to_string()`.
#[derive(Debug, Clone)]
pub struct MessagePattern {
    regex: Regex,
    description: String,
}

impl MessagePattern {
    /// Compiles a pattern; the pattern text doubles as its description.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidPattern`](crate::DispatchError::InvalidPattern)
    /// if the regex does not compile.
    pub fn new(pattern: &str) -> DispatchResult<Self> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            description: pattern.to_string(),
        })
    }

    /// Creates a pattern from a pre-compiled regex.
    pub fn with_regex(regex: Regex, description: impl Into<String>) -> Self {
        Self {
            regex,
            description: description.into(),
        }
    }

    /// Sets a human-readable description.
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the regex.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Checks if the pattern matches the given text.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Checks if the pattern matches the error's display text.
    pub fn matches<E: fmt::Display + ?Sized>(&self, error: &E) -> bool {
        self.is_match(&error.to_string())
    }

    /// Converts the pattern into a predicate usable with the builder.
    pub fn predicate<E>(&self) -> Predicate<E>
    where
        E: fmt::Display + 'static,
    {
        let regex = self.regex.clone();
        Arc::new(move |error: &E| regex.is_match(&error.to_string()))
    }
}

impl fmt::Display for MessagePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DispatchError;

    #[test]
    fn test_pattern_matches_display_text() {
        let pattern = MessagePattern::new(r"(?i)\brate[\s\-]?limit").unwrap();
        assert!(pattern.matches("Rate limit exceeded"));
        assert!(pattern.matches(&std::io::Error::other("hit rate-limit")));
        assert!(!pattern.matches("connection reset"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = MessagePattern::new("(unclosed").unwrap_err();
        assert!(matches!(err, DispatchError::InvalidPattern(_)));
    }

    #[test]
    fn test_predicate_uses_display() {
        let pattern = MessagePattern::new(r"\b5[0-9]{2}\b")
            .unwrap()
            .described("HTTP 5xx server error");
        let predicate = pattern.predicate::<String>();
        assert!(predicate(&"upstream returned 503".to_string()));
        assert!(!predicate(&"upstream returned 404".to_string()));
        assert_eq!(pattern.to_string(), "HTTP 5xx server error");
    }

    #[test]
    fn test_with_regex() {
        let pattern = MessagePattern::with_regex(Regex::new("timeout").unwrap(), "timeouts");
        assert_eq!(pattern.description(), "timeouts");
        assert_eq!(pattern.regex().as_str(), "timeout");
        assert!(pattern.is_match("request timeout"));
    }
}
