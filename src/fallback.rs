//! Default handling for errors that no configured rule claimed.
//!
//! There is no process-wide fallback. Applications create a
//! [`DefaultHandler`] at startup and pass it where it is needed, typically
//! to [`ErrorHandler::handle_or_fallback`](crate::ErrorHandler::handle_or_fallback).

use std::fmt::{self, Display};
use std::sync::Arc;

use tracing::error;

type Sink = Arc<dyn Fn(&dyn Display) + Send + Sync>;

/// An injectable sink for uncaught errors.
#[derive(Clone)]
pub struct DefaultHandler {
    sink: Sink,
}

impl Default for DefaultHandler {
    fn default() -> Self {
        Self::tracing()
    }
}

impl DefaultHandler {
    /// Creates a default handler from a custom sink.
    pub fn new<F>(sink: F) -> Self
    where
        F: Fn(&dyn Display) + Send + Sync + 'static,
    {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Reports uncaught errors as `tracing` error events.
    pub fn tracing() -> Self {
        Self::new(|err| error!(error = %err, "unhandled error"))
    }

    /// Writes uncaught errors to stderr.
    pub fn stderr() -> Self {
        Self::new(|err| eprintln!("‼️ Unhandled error: {err}"))
    }

    /// Passes an error that nothing else handled to the sink.
    pub fn handle_uncaught(&self, err: &dyn Display) {
        (self.sink)(err);
    }
}

impl fmt::Debug for DefaultHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultHandler").finish_non_exhaustive()
    }
}
