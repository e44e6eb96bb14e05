//! Wire encoding
//!
//! Encoding and decoding of single values on a byte stream.
//!
//! Values are encoded into a buffer first and written with one `write_all`, so
//! a value that fails validation never puts a byte on the wire.

use std::io::{ErrorKind as IoErrorKind, Read, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{TypeTag, Value};
use crate::error::{ProbeError, Result};

/// Longest utf8string payload the 2-byte length prefix can describe
pub const MAX_UTF8_LEN: usize = u16::MAX as usize;

/// Terminator of a bytestring
pub const SENTINEL: u8 = 0x00;

// =============================================================================
// Encoding
// =============================================================================

/// Encode a value to its exact wire bytes
pub fn encode_value(value: &Value) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(value.tag().width().unwrap_or(16));

    match value {
        Value::Int32(v) => buf.put_i32(*v),
        Value::Int64(v) => buf.put_i64(*v),
        Value::Byte(v) => buf.put_i8(*v),
        Value::Float32(v) => buf.put_f32(*v),
        Value::Float64(v) => buf.put_f64(*v),
        Value::Boolean(v) => buf.put_u8(u8::from(*v)),
        Value::Char8(b) => buf.put_u8(*b),
        Value::Char16(unit) => buf.put_u16(*unit),
        Value::Utf8String(s) => {
            let len = u16::try_from(s.len()).map_err(|_| ProbeError::StringTooLong {
                len: s.len(),
                max: MAX_UTF8_LEN,
            })?;
            buf.reserve(2 + s.len());
            buf.put_u16(len);
            buf.put_slice(s.as_bytes());
        }
        Value::ByteString(bytes) => {
            if bytes.contains(&SENTINEL) {
                return Err(ProbeError::literal(
                    TypeTag::ByteString,
                    &String::from_utf8_lossy(bytes),
                    "embedded NUL collides with the terminating sentinel",
                ));
            }
            buf.reserve(bytes.len() + 1);
            buf.put_slice(bytes);
            buf.put_u8(SENTINEL);
        }
    }

    Ok(buf.freeze())
}

/// Write one value to a stream and flush
pub fn write_value<W: Write>(writer: &mut W, value: &Value) -> Result<()> {
    let bytes = encode_value(value)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Parse `literal` under `tag` and write it to `writer`
///
/// Nothing is written unless the literal is valid.
pub fn encode_and_send<W: Write>(tag: TypeTag, literal: &str, writer: &mut W) -> Result<Value> {
    let value = Value::parse(tag, literal)?;
    write_value(writer, &value)?;
    tracing::trace!(%tag, literal, "value written");
    Ok(value)
}

// =============================================================================
// Decoding
// =============================================================================

/// Read one value of type `tag` from a stream
///
/// Blocks until the full value has arrived. End of stream maps to
/// [`ProbeError::PeerClosed`]; timeouts surface as [`ProbeError::Io`].
/// Never reads past the end of the value.
pub fn read_and_decode<R: Read>(tag: TypeTag, reader: &mut R) -> Result<Value> {
    read_and_decode_buffered(tag, reader, &mut BytesMut::new())
}

/// Read one value, resuming from bytes left in `pending` by an earlier attempt
///
/// Bytes that arrive before an error (a timeout, typically) stay in `pending`,
/// so the next call picks the value up where this one stopped. A complete
/// value is removed from `pending` even when it fails to decode.
pub fn read_and_decode_buffered<R: Read>(
    tag: TypeTag,
    reader: &mut R,
    pending: &mut BytesMut,
) -> Result<Value> {
    loop {
        match frame_len(tag, pending) {
            Frame::Complete(len) => {
                let frame = pending.split_to(len).freeze();
                return decode_frame(tag, frame);
            }
            Frame::Needs(more) => fill(reader, pending, more)?,
        }
    }
}

/// How much of a buffer the next value occupies
enum Frame {
    /// The value is the first `n` bytes
    Complete(usize),

    /// At least `n` more bytes are required
    Needs(usize),
}

fn frame_len(tag: TypeTag, buf: &[u8]) -> Frame {
    let have = buf.len();
    let want = match tag {
        TypeTag::Utf8String => match buf.get(..2) {
            Some(prefix) => 2 + u16::from_be_bytes([prefix[0], prefix[1]]) as usize,
            None => 2,
        },
        TypeTag::ByteString => {
            return match buf.iter().position(|&b| b == SENTINEL) {
                Some(end) => Frame::Complete(end + 1),
                None => Frame::Needs(1),
            };
        }
        fixed => fixed.width().unwrap_or(1),
    };

    if have >= want {
        Frame::Complete(want)
    } else {
        Frame::Needs(want - have)
    }
}

/// Decode a complete frame as sized by `frame_len`
fn decode_frame(tag: TypeTag, mut frame: Bytes) -> Result<Value> {
    let value = match tag {
        TypeTag::Int32 => Value::Int32(frame.get_i32()),
        TypeTag::Int64 => Value::Int64(frame.get_i64()),
        TypeTag::Byte => Value::Byte(frame.get_i8()),
        TypeTag::Float32 => Value::Float32(frame.get_f32()),
        TypeTag::Float64 => Value::Float64(frame.get_f64()),
        TypeTag::Boolean => Value::Boolean(frame.get_u8() != 0),
        TypeTag::Char8 => Value::Char8(frame.get_u8()),
        TypeTag::Char16 => Value::Char16(frame.get_u16()),
        TypeTag::Utf8String => {
            frame.advance(2);
            let s = String::from_utf8(frame.to_vec())
                .map_err(|e| ProbeError::Decode(format!("utf8string payload: {}", e)))?;
            Value::Utf8String(s)
        }
        TypeTag::ByteString => {
            frame.truncate(frame.len() - 1);
            Value::ByteString(frame.to_vec())
        }
    };

    Ok(value)
}

/// Append up to `max` bytes from `reader` to `pending`
///
/// Makes one successful read. Whatever arrived before an error is kept.
fn fill<R: Read>(reader: &mut R, pending: &mut BytesMut, max: usize) -> Result<()> {
    let start = pending.len();
    pending.resize(start + max, 0);

    loop {
        match reader.read(&mut pending[start..]) {
            Ok(0) => {
                pending.truncate(start);
                return Err(ProbeError::PeerClosed);
            }
            Ok(n) => {
                pending.truncate(start + n);
                return Ok(());
            }
            Err(e) if e.kind() == IoErrorKind::Interrupted => continue,
            Err(e) => {
                pending.truncate(start);
                return Err(ProbeError::Io(e));
            }
        }
    }
}
