//! Encoding and decoding of a single record's framed binary layout.
//!
//! Layout, in order: a 1-byte delimiter, a 4-byte big-endian
//! `message_length` (the length of the serialized payload that follows,
//! including the payload's own length prefix), and the serialized payload
//! itself (which for [`crate::payload::SpacePostText`] is a 2-byte
//! big-endian `payload_length` followed by that many bytes of raw text).
//!
//! This module has no I/O policy of its own: every branch returns a typed
//! [`WriteError`]/[`ReadError`] rather than aborting, so [`crate::engine::Engine`]
//! can classify and report every failure point.

use crate::error::{ReadError, WriteError};
use crate::payload::{Payload, PayloadError};
use std::io::{Read, Write};

/// Writes one complete record to `writer`: delimiter, `message_length`,
/// then the payload's own encoding.
///
/// `message_length` is derived directly from what `payload.encode`
/// produced, so the two can never disagree; this is the Rust version of
/// the design's "assert what's announced matches what's written" rule —
/// here the correspondence is structural rather than asserted.
pub fn encode<W: Write, P: Payload>(writer: &mut W, delimiter: u8, payload: &P) -> Result<(), WriteError> {
    let mut encoded = Vec::new();
    payload.encode(&mut encoded);
    let message_length = u32::try_from(encoded.len()).expect("payload encoding fits in u32");

    write_checked(writer, &[delimiter], WriteError::DelimiterWrite, WriteError::DelimiterSize)?;
    write_checked(
        writer,
        &message_length.to_be_bytes(),
        WriteError::MessageSizeWrite,
        WriteError::MessageSizeSize,
    )?;
    write_checked(
        writer,
        &encoded,
        WriteError::MessageContentWrite,
        WriteError::MessageContentSize,
    )?;
    Ok(())
}

fn write_checked(
    writer: &mut impl Write,
    bytes: &[u8],
    io_err: fn(u32) -> WriteError,
    size_err: fn(u32) -> WriteError,
) -> Result<(), WriteError> {
    match writer.write(bytes) {
        Ok(n) if n == bytes.len() => Ok(()),
        Ok(n) => Err(size_err(n as u32)),
        Err(e) => Err(io_err(os_code(&e))),
    }
}

fn os_code(err: &std::io::Error) -> u32 {
    err.raw_os_error().map_or(u32::MAX, |c| c as u32)
}

/// Reads and validates one complete record from `reader`, returning the
/// decoded payload.
///
/// Order of checks matches the design document exactly:
/// 1. delimiter byte (size-short, then content mismatch)
/// 2. `message_length` (size-short)
/// 3. `message_length` bounds: `> 0` and `<= buffer_capacity`
/// 4. the payload bytes themselves (size-short)
/// 5. the payload's own decode (length-prefix mismatch or trailing bytes)
/// 6. one more byte read, expecting clean EOF
pub fn decode<R: Read, P: Payload>(
    reader: &mut R,
    delimiter: u8,
    buffer_capacity: usize,
) -> Result<P, ReadError> {
    let mut delim_buf = [0u8; 1];
    read_checked(reader, &mut delim_buf, ReadError::DelimiterRead, ReadError::DelimiterSize)?;
    if delim_buf[0] != delimiter {
        return Err(ReadError::DelimiterContent(u32::from(delim_buf[0])));
    }

    let mut len_buf = [0u8; 4];
    read_checked(reader, &mut len_buf, ReadError::MessageSizeRead, ReadError::MessageSizeSize)?;
    let message_length = u32::from_be_bytes(len_buf);

    if message_length == 0 {
        return Err(ReadError::MessageSizeZero(0));
    }
    if message_length as usize > buffer_capacity {
        return Err(ReadError::MessageSizeExceedsBuffer(message_length));
    }

    let mut content = vec![0u8; message_length as usize];
    read_checked(
        reader,
        &mut content,
        ReadError::MessageContentRead,
        ReadError::MessageContentSize,
    )?;

    let payload = P::decode(&content).map_err(|e| match e {
        PayloadError::LengthPrefixMismatch { claimed, available } => {
            if claimed > available {
                ReadError::MessageContentDeserReadLength((claimed - available) as u32)
            } else {
                ReadError::MessageContentDeserExcecute(claimed as u32)
            }
        }
        PayloadError::TrailingBytes { trailing } => ReadError::MessageContentDeserReadLength(trailing as u32),
    })?;

    // Anything but a clean "0 bytes read" here means the file has more
    // content than the record accounts for (or failed to report EOF
    // cleanly); either way the design classifies it as `FILE_END`, with no
    // code attached.
    let mut probe = [0u8; 1];
    match reader.read(&mut probe) {
        Ok(0) => Ok(payload),
        _ => Err(ReadError::FileEnd),
    }
}

fn read_checked(
    reader: &mut impl Read,
    buf: &mut [u8],
    io_err: fn(u32) -> ReadError,
    size_err: fn(u32) -> ReadError,
) -> Result<(), ReadError> {
    match reader.read(buf) {
        Ok(n) if n == buf.len() => Ok(()),
        Ok(n) => Err(size_err(n as u32)),
        Err(e) => Err(io_err(os_code(&e))),
    }
}
