//! Filesystem layer: path construction, directory creation, listing, and
//! file-name recognition.

use crate::config::StorageConfig;
use crate::error::IndexRestoreError;
use crate::events::{Event, EventSink};
use std::fs;
use std::path::{Path, PathBuf};

/// Thin wrapper over [`StorageConfig`]'s directory, directory creation, and
/// listing.
///
/// All operations are synchronous; there is no suspension point anywhere
/// in this module.
pub struct StorageDirectory<'a> {
    config: &'a StorageConfig,
}

impl<'a> StorageDirectory<'a> {
    /// Wraps `config` for filesystem operations.
    #[must_use]
    pub fn new(config: &'a StorageConfig) -> Self {
        Self { config }
    }

    /// Creates the configured directory if it does not already exist.
    ///
    /// Emits [`Event::StorageDirectoryWarning`] whenever the directory was
    /// missing, whether or not creating it succeeded — a caller that
    /// cares whether creation actually happened should check
    /// `config.directory.exists()` afterwards.
    pub fn ensure_exists(&self, sink: &dyn EventSink) {
        if self.config.directory.exists() {
            return;
        }
        let created = fs::create_dir_all(&self.config.directory).is_ok();
        sink.emit(Event::StorageDirectoryWarning {
            path: self.config.directory.display().to_string(),
            created,
        });
    }

    /// The absolute path a record at `index` would be stored at.
    #[must_use]
    pub fn path_for(&self, index: u32) -> PathBuf {
        self.config.path_for(index)
    }

    /// Lists every index recognized by the configured file-name pattern,
    /// ascending.
    ///
    /// Any entry that is not a valid UTF-8 name, does not match
    /// `^[0-9]{1,10}<extension>$`, or whose digits don't fit in a `u32` is
    /// silently ignored rather than treated as an error — only directory
    /// `open`/`read` failures are reported.
    pub fn enumerate(&self) -> Result<Vec<u32>, IndexRestoreError> {
        let read_dir = fs::read_dir(&self.config.directory)
            .map_err(|e| IndexRestoreError::StorageDirOpen(os_code(&e)))?;

        let mut indices = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| IndexRestoreError::StorageDirRead(os_code(&e)))?;
            if let Some(name) = entry.file_name().to_str() {
                if let Some(index) = parse_record_name(name, &self.config.file_extension) {
                    indices.push(index);
                }
            }
        }
        indices.sort_unstable();
        Ok(indices)
    }

    /// Removes the file at `path`, reporting but not propagating failure —
    /// used only to clean up a partially-written record after a failed
    /// store.
    pub fn remove(&self, path: &Path) -> std::io::Result<()> {
        fs::remove_file(path)
    }
}

fn os_code(err: &std::io::Error) -> u32 {
    err.raw_os_error().map_or(u32::MAX, |c| c as u32)
}

/// Parses a file name against `^[0-9]{1,10}<extension>$`, returning the
/// decoded index on a match.
///
/// Implemented as a hand-rolled scanner rather than pulling in the `regex`
/// crate: the pattern is fixed-shape and small enough that a linear scan
/// is both simpler and cheaper than compiling a regex per call (see
/// `DESIGN.md` for the dependency-drop rationale).
fn parse_record_name(name: &str, extension: &str) -> Option<u32> {
    let stem = name.strip_suffix(extension)?;
    if stem.is_empty() || stem.len() > crate::config::MAX_INDEX_DIGITS {
        return None;
    }
    if !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse::<u32>().ok()
}
