//! Declarative error dispatch.
//!
//! An [`ErrorHandlerBuilder`] records unconditional actions and
//! predicate-gated rules in call order; [`ErrorHandlerBuilder::build`]
//! freezes them into an [`ErrorHandler`] that runs the sequence against one
//! error per call and reports a [`HandlingResult`].

pub mod builder;
pub mod dispatch;
pub mod result;
pub mod rule;

pub use builder::{new_error_handler_builder, ErrorHandlerBuilder};
pub use dispatch::ErrorHandler;
pub use result::{HandlingResult, MatchPolicy};
pub use rule::{action, Action, AfterHook, BeforeHook, Entry, Predicate, Rule};
