//! error-dispatch - declarative error handling rules
//!
//! Centralizes "what to do when error X happens": build a handler once from
//! unconditional actions and predicate-gated rules, then run every error
//! through it and learn whether any rule claimed it.
//!
//! ```
//! use error_dispatch::{action, ErrorHandler, HandlingResult};
//!
//! let handler = ErrorHandler::<std::io::ErrorKind>::builder()
//!     .always(|kind| eprintln!("io failure: {kind:?}"))
//!     .when_all(|kind| *kind == std::io::ErrorKind::TimedOut, [
//!         action(|_: &std::io::ErrorKind| eprintln!("retrying")),
//!     ])
//!     .build();
//!
//! assert_eq!(handler.handle(&std::io::ErrorKind::TimedOut), HandlingResult::Handled);
//! assert_eq!(handler.handle(&std::io::ErrorKind::NotFound), HandlingResult::Unhandled);
//! ```

pub mod config;
pub mod error;
pub mod fallback;
pub mod handler;
pub mod logging;
pub mod pattern;

pub use config::DispatchConfig;
pub use error::{DispatchError, DispatchResult};
pub use fallback::DefaultHandler;
pub use handler::{
    action, new_error_handler_builder, Action, ErrorHandler, ErrorHandlerBuilder, HandlingResult,
    MatchPolicy, Predicate,
};
pub use pattern::MessagePattern;
