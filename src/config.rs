//! Configuration for a [`crate::engine::Engine`] instance.
//!
//! All of the "process-wide constants" from the original component (storage
//! directory, delimiter byte, file extension, history/batch size) are held
//! here as per-instance configuration instead, so a single process can run
//! more than one storage engine against different directories (e.g. in
//! tests).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Byte placed at offset 0 of every record file as a basic integrity check.
pub const DEFAULT_DELIMITER: u8 = 0xD9;

/// Index assigned to the first message ever stored, if recovery finds
/// nothing to resume from.
pub const DEFAULT_INITIAL_INDEX: u32 = 0;

/// File extension appended to every record file name, dot included.
pub const DEFAULT_FILE_EXTENSION: &str = ".spaceposts";

/// Maximum number of decimal digits in a record's file stem (`u32::MAX` has
/// 10 digits).
pub const MAX_INDEX_DIGITS: usize = 10;

/// Default cap on a message's raw text length, mirroring the original
/// component's `FppConstant_SpacePost_MaxTextLength`.
pub const DEFAULT_MAX_TEXT_LEN: usize = 1024;

/// Configuration for where and how [`crate::engine::Engine`] persists
/// records.
///
/// # Examples
///
/// ```
/// use spacepost_storage::config::StorageConfig;
///
/// let config = StorageConfig::new("/tmp/spaceposts", 16);
/// assert_eq!(config.history_cap, 16);
/// assert_eq!(config.batch_cap, 16);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Absolute directory in which record files are stored.
    pub directory: PathBuf,

    /// File extension for record files, including the leading dot.
    pub file_extension: String,

    /// Index assigned on the first successful store when recovery finds no
    /// existing records.
    pub initial_index: u32,

    /// Delimiter byte expected at offset 0 of every record.
    pub delimiter: u8,

    /// Capacity of the in-memory recent-index history kept by the
    /// [`crate::allocator::IndexAllocator`].
    ///
    /// Also used as the cap for [`crate::engine::Engine::load_last_n`]
    /// (`BATCH_CAP` in the original design — the two are the same knob).
    pub history_cap: u8,

    /// Maximum number of records [`crate::engine::Engine::load_last_n`] will
    /// return, regardless of the caller-supplied `n`.
    pub batch_cap: u8,

    /// Maximum raw text length (in bytes) a [`crate::payload::SpacePostText`]
    /// stored through this config is allowed to have.
    ///
    /// Drives [`crate::codec::decode`]'s scratch-buffer capacity
    /// (`2 + max_text_len`, the payload's own length prefix plus its text).
    /// A compile-time constant in the original design; a per-instance
    /// runtime value here since `MAX_TEXT_LEN` has no natural const-generic
    /// home on a type-erased [`crate::payload::Payload`].
    pub max_text_len: usize,
}

impl StorageConfig {
    /// Creates a config with the documented defaults (delimiter `0xD9`,
    /// initial index `0`, extension `.spaceposts`) for the given directory
    /// and history/batch capacity.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, history_cap: u8) -> Self {
        Self {
            directory: directory.into(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            initial_index: DEFAULT_INITIAL_INDEX,
            delimiter: DEFAULT_DELIMITER,
            history_cap,
            batch_cap: history_cap,
            max_text_len: DEFAULT_MAX_TEXT_LEN,
        }
    }

    /// Returns the absolute path a record at `index` would be stored at.
    #[must_use]
    pub fn path_for(&self, index: u32) -> PathBuf {
        self.directory.join(format!("{index}{}", self.file_extension))
    }

    /// The scratch-buffer capacity [`crate::codec::decode`] should allocate
    /// for a record read through this config: the payload's own 2-byte
    /// length prefix plus `max_text_len`.
    #[must_use]
    pub fn buffer_capacity(&self) -> usize {
        self.max_text_len + 2
    }
}
