//! The immutable handler and its dispatch loop.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use super::rule::{AfterHook, BeforeHook, Entry};
use super::{ErrorHandlerBuilder, HandlingResult, MatchPolicy};
use crate::fallback::DefaultHandler;

/// Runs a frozen sequence of entries against one error at a time.
///
/// A handler holds no mutable state: every call starts from
/// [`HandlingResult::Unhandled`] and keeps its working state on the stack,
/// so one handler can serve concurrent calls from many threads. Cloning is
/// cheap and shares the configuration.
///
/// Panics raised by actions, predicates, hooks or the completion callback
/// are not caught. They unwind out of `handle` and the remaining entries of
/// that call do not run.
pub struct ErrorHandler<E> {
    entries: Arc<[Entry<E>]>,
    before: Arc<[BeforeHook<E>]>,
    after: Arc<[AfterHook<E>]>,
    match_policy: MatchPolicy,
    log_dispatch: bool,
}

impl<E> ErrorHandler<E> {
    /// Starts a new builder.
    pub fn builder() -> ErrorHandlerBuilder<E> {
        ErrorHandlerBuilder::new()
    }

    pub(crate) fn from_parts(
        entries: Vec<Entry<E>>,
        before: Vec<BeforeHook<E>>,
        after: Vec<AfterHook<E>>,
        match_policy: MatchPolicy,
        log_dispatch: bool,
    ) -> Self {
        Self {
            entries: entries.into(),
            before: before.into(),
            after: after.into(),
            match_policy,
            log_dispatch,
        }
    }

    /// Handles one error and reports whether any rule matched.
    ///
    /// Order of a call:
    /// 1. before-hooks, in registration order
    /// 2. entries, in registration order; unconditional actions always run,
    ///    a matching rule runs all of its actions and marks the call handled
    /// 3. after-hooks, in registration order, with the final result
    pub fn handle(&self, error: &E) -> HandlingResult {
        for hook in self.before.iter() {
            hook(error);
        }

        let mut result = HandlingResult::Unhandled;
        for (index, entry) in self.entries.iter().enumerate() {
            match entry {
                Entry::Unconditional(action) => action(error),
                Entry::Conditional(rule) => {
                    if result.is_handled() && self.match_policy == MatchPolicy::First {
                        continue;
                    }
                    if rule.matches(error) {
                        if self.log_dispatch {
                            trace!(entry = index, actions = rule.action_count(), "rule matched");
                        }
                        rule.fire(error);
                        result = HandlingResult::Handled;
                    }
                }
            }
        }

        for hook in self.after.iter() {
            hook(error, result);
        }

        if self.log_dispatch {
            debug!(%result, policy = %self.match_policy, "error dispatched");
        }
        result
    }

    /// Handles one error, then passes the result to `completion`.
    ///
    /// The completion runs exactly once, after the after-hooks, and receives
    /// the same value this method returns.
    pub fn handle_with<F>(&self, error: &E, completion: F) -> HandlingResult
    where
        F: FnOnce(HandlingResult),
    {
        let result = self.handle(error);
        completion(result);
        result
    }

    /// Handles one error and hands it to `fallback` if no rule matched.
    pub fn handle_or_fallback(&self, error: &E, fallback: &DefaultHandler) -> HandlingResult
    where
        E: fmt::Display,
    {
        let result = self.handle(error);
        if !result.is_handled() {
            fallback.handle_uncaught(error);
        }
        result
    }

    /// Number of configured entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the handler has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of conditional entries.
    pub fn rule_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_conditional()).count()
    }

    /// The policy applied once a rule has matched.
    pub fn match_policy(&self) -> MatchPolicy {
        self.match_policy
    }
}

impl<E> Clone for ErrorHandler<E> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            before: Arc::clone(&self.before),
            after: Arc::clone(&self.after),
            match_policy: self.match_policy,
            log_dispatch: self.log_dispatch,
        }
    }
}

impl<E> fmt::Debug for ErrorHandler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorHandler")
            .field("entries", &self.entries)
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .field("match_policy", &self.match_policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    type Log = Arc<Mutex<Vec<String>>>;

    fn recorder(log: &Log, label: &'static str) -> impl Fn(&i32) + Send + Sync + 'static {
        let log = Arc::clone(log);
        move |_: &i32| log.lock().unwrap().push(label.to_string())
    }

    #[test]
    fn test_empty_handler_is_unhandled() {
        let handler = ErrorHandler::<i32>::builder().build();
        assert!(handler.is_empty());
        assert_eq!(handler.handle(&0), HandlingResult::Unhandled);
    }

    #[test]
    fn test_unconditional_only_is_unhandled() {
        let log = Log::default();
        let handler = ErrorHandler::<i32>::builder()
            .always(recorder(&log, "a"))
            .always(recorder(&log, "b"))
            .build();

        assert_eq!(handler.handle(&1), HandlingResult::Unhandled);
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_later_miss_does_not_reset_result() {
        let handler = ErrorHandler::<i32>::builder()
            .when(|e| *e == 1, |_| {})
            .when(|e| *e == 2, |_| {})
            .build();
        assert_eq!(handler.handle(&1), HandlingResult::Handled);
    }

    #[test]
    fn test_first_policy_skips_later_rules_but_not_unconditional() {
        let log = Log::default();
        let handler = ErrorHandler::<i32>::builder()
            .match_policy(MatchPolicy::First)
            .when(|_| true, recorder(&log, "first"))
            .always(recorder(&log, "between"))
            .when(|_| true, recorder(&log, "second"))
            .build();

        assert_eq!(handler.handle(&0), HandlingResult::Handled);
        assert_eq!(*log.lock().unwrap(), vec!["first", "between"]);
    }

    #[test]
    fn test_first_policy_does_not_evaluate_skipped_predicates() {
        let evaluated = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&evaluated);
        let handler = ErrorHandler::<i32>::builder()
            .match_policy(MatchPolicy::First)
            .when(|_| true, |_| {})
            .when(
                move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    true
                },
                |_| {},
            )
            .build();

        handler.handle(&0);
        assert_eq!(evaluated.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_hooks_bracket_entries() {
        let log = Log::default();
        let after_log = Arc::clone(&log);
        let handler = ErrorHandler::<i32>::builder()
            .before(recorder(&log, "before"))
            .when(|e| *e > 0, recorder(&log, "rule"))
            .after(move |_, result: HandlingResult| {
                after_log.lock().unwrap().push(format!("after:{result}"))
            })
            .build();

        handler.handle(&5);
        handler.handle(&-5);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["before", "rule", "after:handled", "before", "after:unhandled"]
        );
    }

    #[test]
    fn test_rule_with_no_actions_still_handles() {
        let handler = ErrorHandler::<i32>::builder()
            .when_all(|_| true, Vec::new())
            .build();
        assert_eq!(handler.handle(&0), HandlingResult::Handled);
    }

    #[test]
    fn test_clone_shares_configuration() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let handler = ErrorHandler::<i32>::builder()
            .always_all([action(move |_: &i32| {
                counter.fetch_add(1, Ordering::SeqCst);
            })])
            .build();
        let copy = handler.clone();

        handler.handle(&0);
        copy.handle(&0);
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(copy.len(), 1);
        assert_eq!(copy.rule_count(), 0);
    }
}
