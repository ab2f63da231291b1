//! Fluent configuration surface for [`ErrorHandler`].

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::rule::{Action, AfterHook, BeforeHook, Entry, Predicate, Rule};
use super::{ErrorHandler, HandlingResult, MatchPolicy};
use crate::config::DispatchConfig;
use crate::pattern::MessagePattern;

/// Creates an empty builder for errors of type `E`.
pub fn new_error_handler_builder<E>() -> ErrorHandlerBuilder<E> {
    ErrorHandlerBuilder::new()
}

/// Accumulates entries in call order and freezes them into an [`ErrorHandler`].
///
/// Every configuration call appends; nothing is ever reordered or merged.
/// [`build`](Self::build) takes `&self`, so a builder can keep being
/// configured after a build and each handler reflects the builder's state at
/// the time it was built.
///
/// A builder is meant to be configured from one place before the handler is
/// shared; it is not synchronized.
///
/// # Examples
///
/// ```
/// use error_dispatch::{action, new_error_handler_builder, HandlingResult};
///
/// #[derive(Debug, PartialEq)]
/// enum NetworkError { Timeout, ServerError }
///
/// let handler = new_error_handler_builder::<NetworkError>()
///     .always(|e| println!("start: {e:?}"))
///     .when_all(|e| *e == NetworkError::Timeout, [
///         action(|_: &NetworkError| println!("retry")),
///         action(|_: &NetworkError| println!("log timeout")),
///     ])
///     .always(|_| println!("end"))
///     .build();
///
/// assert_eq!(handler.handle(&NetworkError::Timeout), HandlingResult::Handled);
/// assert_eq!(handler.handle(&NetworkError::ServerError), HandlingResult::Unhandled);
/// ```
pub struct ErrorHandlerBuilder<E> {
    entries: Vec<Entry<E>>,
    before: Vec<BeforeHook<E>>,
    after: Vec<AfterHook<E>>,
    match_policy: MatchPolicy,
    log_dispatch: bool,
}

impl<E> Default for ErrorHandlerBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ErrorHandlerBuilder<E> {
    /// Creates a builder with no entries, no hooks and [`MatchPolicy::All`].
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            before: Vec::new(),
            after: Vec::new(),
            match_policy: MatchPolicy::default(),
            log_dispatch: true,
        }
    }

    /// Appends an action that runs for every error.
    pub fn always<F>(mut self, action: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.entries.push(Entry::Unconditional(Arc::new(action)));
        self
    }

    /// Appends one unconditional entry per action, in sequence order.
    ///
    /// Equivalent to calling [`always`](Self::always) once per element.
    pub fn always_all<I>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = Action<E>>,
    {
        self.entries
            .extend(actions.into_iter().map(Entry::Unconditional));
        self
    }

    /// Appends a rule with a single action.
    pub fn when<P, F>(mut self, predicate: P, action: F) -> Self
    where
        P: Fn(&E) -> bool + Send + Sync + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let action: Action<E> = Arc::new(action);
        self.entries.push(Entry::Conditional(Rule::new(
            Arc::new(predicate),
            vec![action],
        )));
        self
    }

    /// Appends one rule whose actions all fire together when it matches.
    ///
    /// This is not the same as calling [`when`](Self::when) once per action:
    /// the rule matches as a whole, and counts once under
    /// [`MatchPolicy::First`].
    pub fn when_all<P, I>(mut self, predicate: P, actions: I) -> Self
    where
        P: Fn(&E) -> bool + Send + Sync + 'static,
        I: IntoIterator<Item = Action<E>>,
    {
        self.entries.push(Entry::Conditional(Rule::new(
            Arc::new(predicate),
            actions.into_iter().collect(),
        )));
        self
    }

    /// Appends a rule from an already shared predicate.
    pub fn when_predicate<I>(mut self, predicate: Predicate<E>, actions: I) -> Self
    where
        I: IntoIterator<Item = Action<E>>,
    {
        self.entries.push(Entry::Conditional(Rule::new(
            predicate,
            actions.into_iter().collect(),
        )));
        self
    }

    /// Appends a rule matching errors whose display text matches `pattern`.
    pub fn when_message<I>(self, pattern: &MessagePattern, actions: I) -> Self
    where
        E: fmt::Display + 'static,
        I: IntoIterator<Item = Action<E>>,
    {
        self.when_predicate(pattern.predicate(), actions)
    }

    /// Registers a hook that runs before any entry on every call.
    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.before.push(Arc::new(hook));
        self
    }

    /// Registers a hook that runs after all entries on every call.
    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&E, HandlingResult) + Send + Sync + 'static,
    {
        self.after.push(Arc::new(hook));
        self
    }

    /// Sets how rules are evaluated once one has matched.
    pub fn match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    /// Enables or disables the crate's `tracing` events.
    ///
    /// Covers the event emitted by [`build`](Self::build) and the per-call
    /// events of the built handler.
    pub fn log_dispatch(mut self, enabled: bool) -> Self {
        self.log_dispatch = enabled;
        self
    }

    /// Applies the settings from a loaded configuration.
    pub fn with_config(self, config: &DispatchConfig) -> Self {
        self.match_policy(config.match_policy)
            .log_dispatch(config.log_dispatch)
    }

    /// Number of entries configured so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries have been configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of conditional entries configured so far.
    pub fn rule_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_conditional()).count()
    }

    /// Builds a handler from a copy of the current configuration.
    pub fn build(&self) -> ErrorHandler<E> {
        if self.log_dispatch {
            debug!(
                entries = self.entries.len(),
                rules = self.rule_count(),
                before_hooks = self.before.len(),
                after_hooks = self.after.len(),
                policy = %self.match_policy,
                "built error handler"
            );
        }

        ErrorHandler::from_parts(
            self.entries.clone(),
            self.before.clone(),
            self.after.clone(),
            self.match_policy,
            self.log_dispatch,
        )
    }
}

impl<E> fmt::Debug for ErrorHandlerBuilder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorHandlerBuilder")
            .field("entries", &self.entries)
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .field("match_policy", &self.match_policy)
            .finish()
    }
}
