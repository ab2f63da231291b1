//! Integration tests for configuration loading.
//!
//! Kept in their own test binary: they set process environment variables,
//! which would leak into unrelated tests running on other threads.

use std::io::Write;

use error_dispatch::{new_error_handler_builder, DispatchConfig, HandlingResult, MatchPolicy};

#[test]
fn test_environment_overrides_config_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temp file");
    writeln!(file, "match_policy = \"all\"").expect("Failed to write config");
    writeln!(file, "log_dispatch = true").expect("Failed to write config");

    let from_file = DispatchConfig::load(file.path()).expect("Failed to load config");
    assert_eq!(from_file.match_policy, MatchPolicy::All);
    assert!(from_file.log_dispatch);

    std::env::set_var("ERROR_DISPATCH__MATCH_POLICY", "first");
    std::env::set_var("ERROR_DISPATCH__LOG_DISPATCH", "false");
    let overridden = DispatchConfig::load(file.path());
    std::env::remove_var("ERROR_DISPATCH__MATCH_POLICY");
    std::env::remove_var("ERROR_DISPATCH__LOG_DISPATCH");

    let overridden = overridden.expect("Failed to load config with overrides");
    assert_eq!(overridden.match_policy, MatchPolicy::First);
    assert!(!overridden.log_dispatch);

    let fired = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let (a, b) = (fired.clone(), fired.clone());
    let handler = new_error_handler_builder::<u16>()
        .with_config(&overridden)
        .when(|_| true, move |_| {
            a.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        })
        .when(|_| true, move |_| {
            b.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        })
        .build();

    assert_eq!(handler.handle(&503), HandlingResult::Handled);
    assert_eq!(fired.load(std::sync::atomic::Ordering::SeqCst), 1);
}
