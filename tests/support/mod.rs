//! Shared test fixtures for the integration and property tests.
//!
//! Grounded on the original component's `SpacePostFile` / `StorageDirectorySetup`
//! test models (`examples/original_source/SpacePosts/MessageStorage/test/ut/model/`):
//! a byte-level record builder independent of `codec::encode`, plus a
//! directory-of-files harness that can populate a `tempfile::TempDir` with a
//! mix of valid records and foreign/malformed names.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Builds the raw on-disk bytes for a single record from explicit field
/// values, independently of [`spacepost_storage::codec::encode`].
///
/// This leaks white-box knowledge of the framed binary layout into the test
/// fixtures on purpose, the same way the original `SpacePostFile` model's
/// doc comment justifies it: only by constructing bytes field-by-field can a
/// test build both a valid record and a deliberately-inconsistent one (wrong
/// delimiter, mismatched lengths, trailing bytes) to assert on `Engine`'s
/// reaction to each checkpoint.
#[derive(Debug, Clone)]
pub struct SpacePostFileBuilder {
    delimiter: u8,
    message_length: u32,
    payload_length: u16,
    text: Vec<u8>,
}

impl SpacePostFileBuilder {
    /// A builder for a well-formed record containing `text`: `message_length`
    /// is `text.len() + 2` and `payload_length` is `text.len()`, matching
    /// what `codec::encode` would have produced.
    #[must_use]
    pub fn valid(text: &[u8]) -> Self {
        let payload_length = u16::try_from(text.len()).expect("test text fits in u16");
        Self {
            delimiter: 0xD9,
            message_length: u32::from(payload_length) + 2,
            payload_length,
            text: text.to_vec(),
        }
    }

    /// Overrides the delimiter byte, e.g. to `0xD8` for a mismatch test.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Overrides `message_length` independently of `text`'s actual length,
    /// e.g. to `0` for a `MESSAGE_SIZE_ZERO` test.
    #[must_use]
    pub fn with_message_length(mut self, message_length: u32) -> Self {
        self.message_length = message_length;
        self
    }

    /// Overrides `payload_length` independently of `text`'s actual length.
    #[must_use]
    pub fn with_payload_length(mut self, payload_length: u16) -> Self {
        self.payload_length = payload_length;
        self
    }

    /// Appends `extra` bytes after the record, e.g. to trigger `FILE_END`.
    #[must_use]
    pub fn with_trailing_bytes(mut self, extra: &[u8]) -> Self {
        self.text.extend_from_slice(extra);
        self
    }

    /// Renders this builder's fields to the exact on-disk byte sequence.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(7 + self.text.len());
        bytes.push(self.delimiter);
        bytes.extend_from_slice(&self.message_length.to_be_bytes());
        bytes.extend_from_slice(&self.payload_length.to_be_bytes());
        bytes.extend_from_slice(&self.text);
        bytes
    }

    /// Writes this record's bytes to `<dir>/<index><extension>`, overwriting
    /// any existing file with that name.
    pub fn write_to(&self, dir: &Path, index: u32, extension: &str) -> PathBuf {
        let path = dir.join(format!("{index}{extension}"));
        std::fs::write(&path, self.to_bytes()).expect("write test record");
        path
    }
}

/// Populates a [`tempfile::TempDir`] with a mix of valid records and
/// arbitrary foreign file names, mirroring
/// `StorageDirectorySetup::realizeOnFileSystem`.
pub struct StorageDirectorySetup {
    pub dir: tempfile::TempDir,
}

impl StorageDirectorySetup {
    /// Creates an empty, already-existing storage directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp storage directory"),
        }
    }

    /// Writes `count` valid records at consecutive indices starting at
    /// `first_index`, advancing by `step` each time (`step` of 1 gives a
    /// contiguous run; larger steps leave recoverable gaps).
    #[must_use]
    pub fn with_valid_records(self, count: u32, first_index: u32, step: u32, extension: &str) -> Self {
        let mut index = first_index;
        for n in 0..count {
            let text = format!("post-{n}");
            SpacePostFileBuilder::valid(text.as_bytes()).write_to(self.dir.path(), index, extension);
            index = index.wrapping_add(step.max(1));
        }
        self
    }

    /// Creates empty or arbitrarily-named files that must never be
    /// recognized as records, mirroring the original model's
    /// `otherFilesNames` list (`foo.txt`, `.`, a numeric stem with the wrong
    /// extension, and so on).
    #[must_use]
    pub fn with_foreign_files(self, names: &[&str]) -> Self {
        for name in names {
            std::fs::write(self.dir.path().join(name), b"").expect("write foreign file");
        }
        self
    }

    /// All record file indices currently on disk, ascending — computed
    /// independently of `directory::parse_record_name` so tests don't
    /// validate the implementation against itself.
    #[must_use]
    pub fn existing_indices(&self, extension: &str) -> Vec<u32> {
        let mut indices: Vec<u32> = std::fs::read_dir(self.dir.path())
            .expect("read storage directory")
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter_map(|name| {
                let stem = name.strip_suffix(extension)?;
                if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                stem.parse::<u32>().ok()
            })
            .collect();
        indices.sort_unstable();
        indices
    }
}

impl Default for StorageDirectorySetup {
    fn default() -> Self {
        Self::new()
    }
}
