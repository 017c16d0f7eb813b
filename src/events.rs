//! Typed events and telemetry counters the engine reports.
//!
//! The surrounding component framework (ports, the event log, telemetry
//! channels) is out of scope for this crate; [`EventSink`] is the seam a
//! host framework implements to translate these into its own machinery,
//! matching the "strategy injection" redesign note for the Moderator's
//! polymorphic predicate — here applied to the event/telemetry channel
//! instead of a global registry of callbacks.

use crate::error::{IndexRestoreError, ReadError, WriteError};

/// Severity at which an [`Event`] would be logged by a typical host
/// framework. Carried as metadata only; [`EventSink`] implementations are
/// free to ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Routine activity, low signal.
    ActivityLow,
    /// Routine activity, high signal (surfaced to an operator).
    ActivityHigh,
    /// Recoverable but noteworthy.
    WarningLow,
    /// Recoverable but serious enough to page someone.
    WarningHigh,
}

/// Every event this crate's [`crate::engine::Engine`] can emit.
///
/// `MessageRejected` is part of the vocabulary because the design
/// documents it, but it is never constructed by this crate: it belongs to
/// the out-of-scope Moderator component (see [`crate::moderator`]), which
/// would sit upstream of `Engine::store` in a full deployment.
///
/// A failed store that also fails its cleanup delete reports that as a
/// *second* `MessageStoreFailed` with `stage: WriteError::CleanupDelete`,
/// rather than a separate variant — the stage enum already has a slot for
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A message was stored successfully at `index`.
    MessageStoreComplete {
        /// The index the message was stored at.
        index: u32,
    },

    /// Storing a message at `index` failed at the given stage.
    MessageStoreFailed {
        /// The index the store was attempted at.
        index: u32,
        /// The failure stage.
        stage: WriteError,
    },

    /// A message was loaded successfully from `index`.
    MessageLoadComplete {
        /// The index the message was loaded from.
        index: u32,
    },

    /// Loading a message from `index` failed at the given stage.
    MessageLoadFailed {
        /// The index the load was attempted at.
        index: u32,
        /// The failure stage.
        stage: ReadError,
    },

    /// A message was rejected by the (out-of-scope) Moderator. Never
    /// constructed by this crate.
    MessageRejected,

    /// Startup recovery finished scanning the storage directory.
    IndexRestoreComplete {
        /// Number of recognized record files found.
        count: u32,
        /// Highest recognized index found (0 if `count == 0`).
        highest: u32,
    },

    /// Startup recovery failed to enumerate the storage directory.
    IndexRestoreFailed {
        /// The failure stage.
        stage: IndexRestoreError,
    },

    /// The index allocator's counter wrapped around past `u32::MAX`.
    IndexWrapAround,

    /// The storage directory did not exist and was (or could not be)
    /// created.
    StorageDirectoryWarning {
        /// The directory path, rendered as a string for the event.
        path: String,
        /// True if the directory was newly created by this call.
        created: bool,
    },
}

impl Event {
    /// The severity a host framework would typically log this event at.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Event::MessageStoreComplete { .. } => Severity::ActivityLow,
            Event::MessageStoreFailed { .. } => Severity::WarningHigh,
            Event::MessageLoadComplete { .. } => Severity::ActivityLow,
            Event::MessageLoadFailed { .. } => Severity::WarningLow,
            Event::MessageRejected => Severity::ActivityHigh,
            Event::IndexRestoreComplete { .. } => Severity::ActivityLow,
            Event::IndexRestoreFailed { .. } => Severity::WarningHigh,
            Event::IndexWrapAround => Severity::WarningLow,
            Event::StorageDirectoryWarning { .. } => Severity::WarningLow,
        }
    }
}

/// Named telemetry counters, reported as `u32` values via
/// [`EventSink::telemetry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryChannel {
    /// Number of `store` calls made so far.
    StoreCount,
    /// Number of `load` calls made so far.
    LoadCount,
    /// The allocator's current `next_index`.
    NextStorageIndex,
}

/// Destination for the engine's events and telemetry.
///
/// Implement this to wire the engine into a real event log / telemetry
/// system; [`LogEventSink`] is the bundled default for use outside of a
/// host framework.
pub trait EventSink {
    /// Reports an event.
    fn emit(&self, event: Event);

    /// Reports a telemetry channel update.
    fn telemetry(&self, channel: TelemetryChannel, value: u32);
}

/// An [`EventSink`] that routes everything through the [`log`] facade, at
/// the severities documented on [`Event::severity`].
///
/// This is the crate's default for standalone use (binaries, examples,
/// tests); a real deployment wires [`EventSink`] to its own framework
/// instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&self, event: Event) {
        match event.severity() {
            Severity::ActivityLow => log::debug!("{event:?}"),
            Severity::ActivityHigh => log::info!("{event:?}"),
            Severity::WarningLow => log::warn!("{event:?}"),
            Severity::WarningHigh => log::error!("{event:?}"),
        }
    }

    fn telemetry(&self, channel: TelemetryChannel, value: u32) {
        log::trace!("{channel:?} = {value}");
    }
}

/// Test-only [`EventSink`] that records every event and telemetry update it
/// sees, so assertions can inspect exactly what the engine reported — the
/// Rust analogue of the original component's `Tester` harness, which
/// asserts on a captured history of dispatched events.
#[cfg(any(test, feature = "testing"))]
pub mod testing {
    use super::{Event, EventSink, TelemetryChannel};
    use std::cell::RefCell;

    /// Records emitted events and telemetry updates for later inspection.
    #[derive(Debug, Default)]
    pub struct RecordingEventSink {
        events: RefCell<Vec<Event>>,
        telemetry: RefCell<Vec<(TelemetryChannel, u32)>>,
    }

    impl RecordingEventSink {
        /// Creates an empty recorder.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns a copy of every event recorded so far, oldest first.
        #[must_use]
        pub fn events(&self) -> Vec<Event> {
            self.events.borrow().clone()
        }

        /// Returns a copy of every telemetry update recorded so far, oldest
        /// first.
        #[must_use]
        pub fn telemetry_updates(&self) -> Vec<(TelemetryChannel, u32)> {
            self.telemetry.borrow().clone()
        }
    }

    impl EventSink for RecordingEventSink {
        fn emit(&self, event: Event) {
            self.events.borrow_mut().push(event);
        }

        fn telemetry(&self, channel: TelemetryChannel, value: u32) {
            self.telemetry.borrow_mut().push((channel, value));
        }
    }
}
