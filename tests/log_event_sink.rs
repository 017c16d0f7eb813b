//! Exercises [`spacepost_storage::events::LogEventSink`], the crate's
//! default `EventSink` for standalone use outside of a host framework.
//!
//! `env_logger` is initialized here (as in the teacher crate's own
//! examples/tests that drive logging output) purely so a human running
//! `cargo test -- --nocapture` can see the emitted lines; the assertions
//! below exercise behavior, not captured log text.

use spacepost_storage::config::StorageConfig;
use spacepost_storage::engine::{Engine, LoadStatus};
use spacepost_storage::events::LogEventSink;
use spacepost_storage::payload::SpacePostText;

#[test]
fn log_event_sink_never_panics_across_a_full_lifecycle() {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig::new(dir.path(), 4);
    let mut engine = Engine::new(config, LogEventSink);
    engine.initialize();

    let index = engine.store(&SpacePostText::from_str("hello, orbit")).unwrap();
    match engine.load(index) {
        LoadStatus::Valid(text) => assert_eq!(text.as_str(), Some("hello, orbit")),
        LoadStatus::Invalid => panic!("just-written record should load"),
    }

    // A corrupted record at a fresh index still only logs, never panics.
    std::fs::write(dir.path().join("99.spaceposts"), b"\xD8garbage").unwrap();
    assert_eq!(engine.load(99), LoadStatus::Invalid);
}
