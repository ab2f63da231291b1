//! Outcome and policy types shared by the builder and the handler.

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use serde::Deserialize;

/// The result of handling one error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HandlingResult {
    /// At least one rule matched during the call.
    Handled,
    /// No rule matched.
    #[default]
    Unhandled,
}

impl HandlingResult {
    /// Returns true if at least one rule matched.
    pub fn is_handled(self) -> bool {
        matches!(self, HandlingResult::Handled)
    }

    /// Merges two results; `Handled` wins.
    pub fn combine(self, other: HandlingResult) -> HandlingResult {
        if self.is_handled() || other.is_handled() {
            HandlingResult::Handled
        } else {
            HandlingResult::Unhandled
        }
    }

    /// Returns the lowercase name of the result.
    pub fn as_str(self) -> &'static str {
        match self {
            HandlingResult::Handled => "handled",
            HandlingResult::Unhandled => "unhandled",
        }
    }
}

impl From<bool> for HandlingResult {
    fn from(matched: bool) -> Self {
        if matched {
            HandlingResult::Handled
        } else {
            HandlingResult::Unhandled
        }
    }
}

impl BitOr for HandlingResult {
    type Output = HandlingResult;

    fn bitor(self, rhs: HandlingResult) -> HandlingResult {
        self.combine(rhs)
    }
}

impl fmt::Display for HandlingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How conditional rules are evaluated once one of them has matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Evaluate every rule; all matching rules fire.
    #[default]
    All,
    /// Stop evaluating rules after the first match.
    ///
    /// Unconditional actions keep running at their registered positions.
    First,
}

impl MatchPolicy {
    /// Returns the lowercase name of the policy.
    pub fn as_str(self) -> &'static str {
        match self {
            MatchPolicy::All => "all",
            MatchPolicy::First => "first",
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(MatchPolicy::All),
            "first" => Ok(MatchPolicy::First),
            other => Err(format!("unknown match policy: {other}")),
        }
    }
}
