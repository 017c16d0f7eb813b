//! Orchestrates `store` / `load` / `load_last_n` and startup recovery,
//! wiring [`crate::allocator::IndexAllocator`], [`crate::codec`] and
//! [`crate::directory::StorageDirectory`] together and reporting every step
//! through an [`EventSink`].

use crate::allocator::IndexAllocator;
use crate::codec;
use crate::config::StorageConfig;
use crate::directory::StorageDirectory;
use crate::error::WriteError;
use crate::events::{Event, EventSink, TelemetryChannel};
use crate::payload::Payload;
use std::fs::OpenOptions;
use std::io;
use std::marker::PhantomData;

/// Outcome of [`Engine::load`].
///
/// A thin wrapper rather than a bare `Option<P>` so call sites read the
/// same way the design's `(Validity, Payload)` pair does; `Invalid` never
/// carries a partially-decoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus<P> {
    /// The record was read and decoded successfully.
    Valid(P),
    /// The record could not be read or decoded; the failure was already
    /// reported through the configured [`EventSink`].
    Invalid,
}

impl<P> LoadStatus<P> {
    /// Converts to `Option<P>`, discarding the distinction between a
    /// deliberate miss and an error (both already logged by `load`).
    #[must_use]
    pub fn into_option(self) -> Option<P> {
        match self {
            LoadStatus::Valid(payload) => Some(payload),
            LoadStatus::Invalid => None,
        }
    }
}

/// Drives a single storage directory's lifecycle: recovery, store, load,
/// and the bounded "most recent N" batch query.
///
/// Every public method here corresponds 1:1 to an operation in the design
/// document; none of them suspend, and none of them panic on bad input or
/// I/O failure — every failure path returns a status and reports an
/// [`Event`].
pub struct Engine<S: EventSink, P: Payload> {
    config: StorageConfig,
    allocator: IndexAllocator,
    sink: S,
    store_attempts: u32,
    load_attempts: u32,
    _payload: PhantomData<P>,
}

impl<S: EventSink, P: Payload> Engine<S, P> {
    /// Creates an engine over `config`, reporting through `sink`.
    ///
    /// Does not touch the filesystem; call [`Engine::initialize`] before
    /// the first `store`/`load` to run startup recovery.
    #[must_use]
    pub fn new(config: StorageConfig, sink: S) -> Self {
        let allocator = IndexAllocator::new(config.initial_index, config.history_cap);
        Self {
            config,
            allocator,
            sink,
            store_attempts: 0,
            load_attempts: 0,
            _payload: PhantomData,
        }
    }

    /// Borrows the configured [`EventSink`], mainly so tests can inspect
    /// what was reported (e.g. via `events::testing::RecordingEventSink`).
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Runs startup recovery: ensures the storage directory exists, scans
    /// it for recognizable record files, and seeds the allocator from what
    /// it finds.
    ///
    /// Idempotent against its own failure: even a totally unreadable
    /// directory leaves the engine usable for fresh stores (which will
    /// themselves fail with `OPEN` until the filesystem recovers).
    pub fn initialize(&mut self) {
        let directory = StorageDirectory::new(&self.config);
        directory.ensure_exists(&self.sink);

        let existing = match directory.enumerate() {
            Ok(existing) => existing,
            Err(stage) => {
                self.sink.emit(Event::IndexRestoreFailed { stage });
                return;
            }
        };

        let count = existing.len() as u32;
        let highest = existing.last().copied().unwrap_or(0);
        self.allocator.seed(&existing, self.config.initial_index);

        self.sink.emit(Event::IndexRestoreComplete { count, highest });
        self.sink
            .telemetry(TelemetryChannel::NextStorageIndex, self.allocator.next_index());
    }

    /// Assigns the next index and durably writes `payload` to it.
    ///
    /// Returns `Ok(index)` on success. On failure the index is still
    /// consumed — it will never be reused by this engine instance — and
    /// any partially-written file at that index has already been removed
    /// (unless the failure was [`WriteError::FileExists`], in which case
    /// the file was never this call's to delete).
    pub fn store(&mut self, payload: &P) -> Result<u32, WriteError> {
        let allocation = self.allocator.allocate();

        self.store_attempts += 1;
        self.sink.telemetry(TelemetryChannel::StoreCount, self.store_attempts);
        self.sink
            .telemetry(TelemetryChannel::NextStorageIndex, self.allocator.next_index());
        if allocation.wrapped {
            self.sink.emit(Event::IndexWrapAround);
        }

        match self.do_store(allocation.index, payload) {
            Ok(()) => {
                self.allocator.remember(allocation.index);
                self.sink.emit(Event::MessageStoreComplete { index: allocation.index });
                Ok(allocation.index)
            }
            Err(stage) => {
                // The primary failure is always reported first; cleanup (if
                // attempted) is a second, later event, per spec.md S7.
                self.sink.emit(Event::MessageStoreFailed { index: allocation.index, stage });

                if stage != WriteError::FileExists {
                    let directory = StorageDirectory::new(&self.config);
                    let path = directory.path_for(allocation.index);
                    if let Err(delete_err) = directory.remove(&path) {
                        self.sink.emit(Event::MessageStoreFailed {
                            index: allocation.index,
                            stage: WriteError::CleanupDelete(os_code(&delete_err)),
                        });
                    }
                }

                Err(stage)
            }
        }
    }

    fn do_store(&self, index: u32, payload: &P) -> Result<(), WriteError> {
        let directory = StorageDirectory::new(&self.config);
        directory.ensure_exists(&self.sink);
        let path = directory.path_for(index);

        // A probe open-for-read that fails with anything other than
        // "not found" means a file is already there — owned by someone
        // else, so it is reported but never deleted.
        match std::fs::File::open(&path) {
            Ok(_) => return Err(WriteError::FileExists),
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(WriteError::FileExists),
            Err(_) => {}
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| WriteError::Open(os_code(&e)))?;

        codec::encode(&mut file, self.config.delimiter, payload)
    }

    /// Reads and decodes the record at `index`.
    ///
    /// On failure the corresponding [`Event::MessageLoadFailed`] has
    /// already been emitted; callers must treat [`LoadStatus::Invalid`] as
    /// carrying no observable payload, even if the underlying decode got
    /// partway through before failing.
    pub fn load(&mut self, index: u32) -> LoadStatus<P> {
        self.load_attempts += 1;
        self.sink.telemetry(TelemetryChannel::LoadCount, self.load_attempts);

        let directory = StorageDirectory::new(&self.config);
        let path = directory.path_for(index);

        let mut file = match std::fs::File::open(&path) {
            Ok(file) => file,
            Err(e) => {
                self.sink.emit(Event::MessageLoadFailed {
                    index,
                    stage: crate::error::ReadError::Open(os_code(&e)),
                });
                return LoadStatus::Invalid;
            }
        };

        match codec::decode::<_, P>(&mut file, self.config.delimiter, self.config.buffer_capacity()) {
            Ok(payload) => {
                self.sink.emit(Event::MessageLoadComplete { index });
                LoadStatus::Valid(payload)
            }
            Err(stage) => {
                self.sink.emit(Event::MessageLoadFailed { index, stage });
                LoadStatus::Invalid
            }
        }
    }

    /// Returns up to `n` (capped at the configured `batch_cap`) of the most
    /// recently *successfully stored* records, newest first.
    ///
    /// Walks the allocator's recent-index history; indices that fail to
    /// load are skipped (already logged by [`Engine::load`]) without
    /// counting against `n`.
    pub fn load_last_n(&mut self, n: u8) -> Vec<P> {
        let cap = n.min(self.config.batch_cap) as usize;
        let mut batch = Vec::with_capacity(cap);

        let candidates: Vec<u32> = self.allocator.recent_newest_first().collect();
        for index in candidates {
            if batch.len() >= cap {
                break;
            }
            if let LoadStatus::Valid(payload) = self.load(index) {
                batch.push(payload);
            }
        }
        batch
    }
}

fn os_code(err: &io::Error) -> u32 {
    err.raw_os_error().map_or(u32::MAX, |c| c as u32)
}
