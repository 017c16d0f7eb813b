//! Stage-classified errors for every failure point the engine can observe.
//!
//! Each variant carries exactly one `u32` code whose meaning depends on the
//! variant: an OS error code, a short byte count, or the offending byte
//! value, as documented per-variant below. These mirror the `WriteError`,
//! `ReadError` and `IndexRestoreError` stage vocabularies from the original
//! component's design, kept wire-compatible with the "spelled-out" tag
//! `MESSAGE_CONTENT_DESER_EXCECUTE` (sic) for event consumers that already
//! key off of it.
//!
//! The design's `*_DESER_SET_LENGTH` stages (for both `message_length` and
//! the content buffer) have no counterpart here: those existed to report a
//! fallible capacity-reservation step ahead of deserialization, and
//! [`crate::codec::decode`] has no such step — `message_length` is a fixed
//! 4-byte read (infallible once the bytes are in hand) and the content
//! buffer is a plain heap `Vec` sized directly from it. See `DESIGN.md`.

use thiserror::Error;

/// Failure stages for [`crate::engine::Engine::store`].
///
/// Ordering matches the wire order in the design document: callers that log
/// the discriminant (e.g. via `as u8`) get a stable mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WriteError {
    /// A file already exists at the target index; the engine does not own
    /// it and will not delete it.
    #[error("file already exists at this index")]
    FileExists,

    /// Opening the record file for writing failed.
    #[error("open failed (os error {0})")]
    Open(u32),

    /// Writing the delimiter byte returned an I/O error.
    #[error("delimiter write failed (os error {0})")]
    DelimiterWrite(u32),

    /// Writing the delimiter byte wrote fewer bytes than expected.
    #[error("delimiter write short: wrote {0} byte(s)")]
    DelimiterSize(u32),

    /// Writing `message_length` returned an I/O error.
    #[error("message size write failed (os error {0})")]
    MessageSizeWrite(u32),

    /// Writing `message_length` wrote fewer bytes than expected.
    #[error("message size write short: wrote {0} byte(s)")]
    MessageSizeSize(u32),

    /// Writing the payload returned an I/O error.
    #[error("message content write failed (os error {0})")]
    MessageContentWrite(u32),

    /// Writing the payload wrote fewer bytes than expected.
    #[error("message content write short: wrote {0} byte(s)")]
    MessageContentSize(u32),

    /// Deleting a partially-written record after a failed store itself
    /// failed. Always reported as a second, additional event alongside the
    /// write error that triggered the cleanup attempt.
    #[error("cleanup delete failed (os error {0})")]
    CleanupDelete(u32),
}

/// Failure stages for [`crate::engine::Engine::load`] / [`crate::codec::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReadError {
    /// Opening the record file for reading failed.
    #[error("open failed (os error {0})")]
    Open(u32),

    /// Reading the delimiter byte returned an I/O error.
    #[error("delimiter read failed (os error {0})")]
    DelimiterRead(u32),

    /// Reading the delimiter byte read fewer bytes than expected.
    #[error("delimiter read short: read {0} byte(s)")]
    DelimiterSize(u32),

    /// The delimiter byte did not match the configured value. Carries the
    /// byte actually read.
    #[error("delimiter mismatch: got {0:#04x}")]
    DelimiterContent(u32),

    /// Reading `message_length` returned an I/O error.
    #[error("message size read failed (os error {0})")]
    MessageSizeRead(u32),

    /// Reading `message_length` read fewer bytes than expected.
    #[error("message size read short: read {0} byte(s)")]
    MessageSizeSize(u32),

    /// `message_length` exceeds the codec's fixed-capacity scratch buffer.
    /// Carries the offending `message_length`.
    #[error("message size {0} exceeds buffer capacity")]
    MessageSizeExceedsBuffer(u32),

    /// `message_length` is zero.
    #[error("message size is zero")]
    MessageSizeZero(u32),

    /// Reading the payload bytes returned an I/O error.
    #[error("message content read failed (os error {0})")]
    MessageContentRead(u32),

    /// Reading the payload bytes read fewer bytes than `message_length`.
    #[error("message content read short: read {0} byte(s)")]
    MessageContentSize(u32),

    /// The payload's decode step failed for a reason other than its own
    /// length-prefix check (kept as the spelled-out tag name for wire
    /// compatibility with existing event consumers).
    #[error("message content deserialization failed (code {0})")]
    MessageContentDeserExcecute(u32),

    /// The payload's own length-prefix check failed, or decoding left
    /// trailing unconsumed bytes. Carries the byte-count discrepancy.
    #[error("message content length prefix mismatch ({0})")]
    MessageContentDeserReadLength(u32),

    /// The file contained bytes after the record was fully read.
    #[error("unexpected bytes after end of record")]
    FileEnd,
}

/// Failure stages for [`crate::directory::StorageDirectory::enumerate`],
/// used during [`crate::engine::Engine::initialize`]'s recovery scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IndexRestoreError {
    /// Opening the storage directory for listing failed.
    #[error("storage directory open failed (os error {0})")]
    StorageDirOpen(u32),

    /// Reading directory entries failed partway through the scan.
    #[error("storage directory read failed (os error {0})")]
    StorageDirRead(u32),
}
