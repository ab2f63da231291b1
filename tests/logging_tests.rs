//! Integration tests for the events the library emits.
//!
//! Events are captured with a counting `tracing_subscriber` layer installed
//! as the thread-local default, so no global subscriber is involved.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use error_dispatch::{new_error_handler_builder, DispatchConfig, HandlingResult};

/// Counts events whose target belongs to this crate.
struct EventCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for EventCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target().starts_with("error_dispatch") {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn count_events(config: &DispatchConfig) -> usize {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(EventCounter(Arc::clone(&count)));

    tracing::subscriber::with_default(subscriber, || {
        let handler = new_error_handler_builder::<u16>()
            .with_config(config)
            .always(|_| {})
            .when(|code| *code >= 500, |_| {})
            .build();

        assert_eq!(handler.handle(&503), HandlingResult::Handled);
        assert_eq!(handler.handle(&404), HandlingResult::Unhandled);
    });

    count.load(Ordering::SeqCst)
}

#[test]
fn test_dispatch_events_emitted_by_default() {
    // build, one matched rule, two per-call results
    assert_eq!(count_events(&DispatchConfig::default()), 4);
}

#[test]
fn test_log_dispatch_false_silences_events() {
    let config = DispatchConfig::from_toml_str("log_dispatch = false").unwrap();
    assert_eq!(count_events(&config), 0);
}
