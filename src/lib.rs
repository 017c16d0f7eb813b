//! # spacepost-storage
//!
//! A durable, append-only file store for short text messages
//! ("SpacePosts"), each written to its own file under a single configured
//! directory using a strict framed binary layout.
//!
//! This crate is the persistence core of a larger message-relay system; the
//! surrounding moderation policy, command dispatch, and component-framework
//! plumbing are not part of it — [`moderator`] only exposes the seam a
//! caller would plug a real policy into.
//!
//! ## Example
//!
//! ```rust
//! use spacepost_storage::config::StorageConfig;
//! use spacepost_storage::engine::{Engine, LoadStatus};
//! use spacepost_storage::events::LogEventSink;
//! use spacepost_storage::payload::SpacePostText;
//!
//! # fn main() -> std::io::Result<()> {
//! let dir = tempfile::tempdir()?;
//! let config = StorageConfig::new(dir.path(), 16);
//! let mut engine = Engine::new(config, LogEventSink);
//! engine.initialize();
//!
//! let index = engine.store(&SpacePostText::from_str("hello, orbit")).unwrap();
//! match engine.load(index) {
//!     LoadStatus::Valid(text) => assert_eq!(text.as_str(), Some("hello, orbit")),
//!     LoadStatus::Invalid => panic!("just-written record should load"),
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

/// Monotonic index allocation and the bounded recent-index history.
pub mod allocator;

/// Per-instance storage configuration.
pub mod config;

/// Encoding and decoding of a single record's framed binary layout.
pub mod codec;

/// Filesystem layer: paths, directory creation, listing, file-name recognition.
pub mod directory;

/// Orchestrates store / load / load-last-N and startup recovery.
pub mod engine;

/// Stage-classified error types for every failure point the engine can observe.
pub mod error;

/// Typed events and telemetry counters the engine reports.
pub mod events;

/// The out-of-scope moderation seam.
pub mod moderator;

/// The message model: the `Payload` trait and the bundled `SpacePostText`.
pub mod payload;

pub use allocator::{Allocation, IndexAllocator};
pub use config::StorageConfig;
pub use engine::{Engine, LoadStatus};
pub use error::{IndexRestoreError, ReadError, WriteError};
pub use events::{Event, EventSink, LogEventSink, Severity, TelemetryChannel};
pub use moderator::{AcceptAll, ModerationStrategy};
pub use payload::{Payload, PayloadError, SpacePostText};

/// The crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version string.
#[must_use]
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_not_empty() {
        assert!(!version().is_empty());
    }
}
