//! Rule and entry types stored by builders and handlers.
//!
//! Callbacks are shared behind `Arc`, so copying an entry list never copies
//! a closure and a built handler can be sent across threads.

use std::fmt;
use std::sync::Arc;

use super::HandlingResult;

/// A side-effecting procedure invoked with the error being handled.
pub type Action<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// A match condition over the error being handled.
pub type Predicate<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

/// A hook run before any entry on every call.
pub type BeforeHook<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// A hook run after all entries on every call, receiving the final result.
pub type AfterHook<E> = Arc<dyn Fn(&E, HandlingResult) + Send + Sync>;

/// Wraps a closure as an [`Action`], for the sequence forms of the builder.
///
/// # Examples
///
/// ```
/// use error_dispatch::{action, new_error_handler_builder};
///
/// let handler = new_error_handler_builder::<u16>()
///     .when_all(|code| *code >= 500, [
///         action(|code: &u16| println!("server error {code}")),
///         action(|_: &u16| println!("scheduling retry")),
///     ])
///     .build();
///
/// assert!(handler.handle(&503).is_handled());
/// ```
pub fn action<E, F>(f: F) -> Action<E>
where
    F: Fn(&E) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A predicate paired with the actions that fire when it matches.
pub struct Rule<E> {
    predicate: Predicate<E>,
    actions: Vec<Action<E>>,
}

impl<E> Rule<E> {
    /// Creates a rule from a predicate and its ordered actions.
    ///
    /// An empty action list is accepted: a matching rule still marks the
    /// error as handled.
    pub fn new(predicate: Predicate<E>, actions: Vec<Action<E>>) -> Self {
        Self { predicate, actions }
    }

    /// Returns true if the predicate matches the error.
    pub fn matches(&self, error: &E) -> bool {
        (self.predicate)(error)
    }

    /// Runs every action in order.
    pub fn fire(&self, error: &E) {
        for action in &self.actions {
            action(error);
        }
    }

    /// Number of actions attached to the rule.
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }
}

impl<E> Clone for Rule<E> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            actions: self.actions.clone(),
        }
    }
}

impl<E> fmt::Debug for Rule<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("actions", &self.actions.len())
            .finish_non_exhaustive()
    }
}

/// One configured step, in registration order.
pub enum Entry<E> {
    /// Always runs.
    Unconditional(Action<E>),
    /// Runs its actions only when the rule matches.
    Conditional(Rule<E>),
}

impl<E> Entry<E> {
    /// Returns true for conditional entries.
    pub fn is_conditional(&self) -> bool {
        matches!(self, Entry::Conditional(_))
    }
}

impl<E> Clone for Entry<E> {
    fn clone(&self) -> Self {
        match self {
            Entry::Unconditional(action) => Entry::Unconditional(Arc::clone(action)),
            Entry::Conditional(rule) => Entry::Conditional(rule.clone()),
        }
    }
}

impl<E> fmt::Debug for Entry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Unconditional(_) => f.write_str("Unconditional"),
            Entry::Conditional(rule) => f.debug_tuple("Conditional").field(rule).finish(),
        }
    }
}
