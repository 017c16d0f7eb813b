//! The message model.
//!
//! `spec.md` describes the stored message as "an opaque serializable
//! payload" — the engine should only need to know how to encode a payload
//! to bytes of a known length and decode it back. [`Payload`] is that seam;
//! [`SpacePostText`] is the bundled implementation used by this crate's
//! tests and examples.

use thiserror::Error;

/// Something [`crate::codec`] can write into and read out of a record file.
///
/// Implementations own their own length-prefixed wire format; the codec
/// only knows the *total* encoded length (see [`crate::config`]'s
/// `message_length` field), not the shape of what is inside it.
pub trait Payload: Sized {
    /// Maximum number of bytes [`Payload::encode`] will ever write.
    ///
    /// For [`SpacePostText`] this is `max_text_len + 2` (the text plus its
    /// own 2-byte length prefix).
    fn max_encoded_len(max_text_len: usize) -> usize;

    /// Appends this payload's wire encoding to `out`.
    fn encode(&self, out: &mut Vec<u8>);

    /// Decodes a payload from exactly `buf`.
    ///
    /// Implementations must reject any trailing bytes in `buf` that are not
    /// part of the encoding — the caller has already sliced `buf` to the
    /// codec's `message_length`, so leftover bytes mean corruption, not a
    /// shorter message.
    fn decode(buf: &[u8]) -> Result<Self, PayloadError>;
}

/// Errors produced while decoding a [`Payload`] from bytes.
///
/// These map onto the `MESSAGE_CONTENT_DESER_*` stages of
/// [`crate::error::ReadError`]; [`crate::codec::decode`] is the only caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// The payload's own length prefix claims more (or fewer) bytes than
    /// `buf` actually contains.
    #[error("length prefix claims {claimed} bytes, buffer holds {available}")]
    LengthPrefixMismatch {
        /// Bytes claimed by the length prefix.
        claimed: usize,
        /// Bytes actually available after the prefix.
        available: usize,
    },

    /// `buf` contained bytes after a complete, self-consistent decode.
    #[error("{trailing} trailing byte(s) after decode")]
    TrailingBytes {
        /// Number of unconsumed bytes.
        trailing: usize,
    },
}

/// A bounded, raw-byte text message — the "SpacePost".
///
/// The original format serializes raw text (not necessarily valid UTF-8):
/// `SpacePostText` stores the message as `Vec<u8>` and only exposes
/// [`SpacePostText::as_str`] when the bytes happen to be valid UTF-8, to stay
/// faithful to that while still being convenient from Rust.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpacePostText {
    bytes: Vec<u8>,
}

impl SpacePostText {
    /// Builds a `SpacePostText` from raw bytes without any length check.
    ///
    /// Callers that need to enforce `MAX_TEXT_LEN` should check
    /// `bytes.len()` themselves — the cap is a property of how a
    /// [`crate::engine::Engine`] is configured, not of this type.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Builds a `SpacePostText` from a UTF-8 string.
    #[must_use]
    pub fn from_str(text: &str) -> Self {
        Self {
            bytes: text.as_bytes().to_vec(),
        }
    }

    /// The raw bytes of the message text.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The message text as `&str`, if the stored bytes are valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// Length of the raw text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Payload for SpacePostText {
    fn max_encoded_len(max_text_len: usize) -> usize {
        max_text_len + 2
    }

    fn encode(&self, out: &mut Vec<u8>) {
        let len = u16::try_from(self.bytes.len()).expect("caller enforces MAX_TEXT_LEN <= u16::MAX");
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(&self.bytes);
    }

    fn decode(buf: &[u8]) -> Result<Self, PayloadError> {
        if buf.len() < 2 {
            return Err(PayloadError::LengthPrefixMismatch {
                claimed: 2,
                available: buf.len(),
            });
        }
        let claimed = u16::from_be_bytes([buf[0], buf[1]]) as usize;
        let available = buf.len() - 2;
        if claimed > available {
            return Err(PayloadError::LengthPrefixMismatch { claimed, available });
        }
        if claimed < available {
            return Err(PayloadError::TrailingBytes {
                trailing: available - claimed,
            });
        }
        Ok(Self::from_bytes(buf[2..].to_vec()))
    }
}
