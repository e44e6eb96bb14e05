//! Codec Module
//!
//! Maps a type tag plus a textual literal to exact bytes on a stream, and
//! bytes back to printable values. Knows nothing about sessions or commands.
//!
//! ## Wire Format (big-endian, no framing)
//! ```text
//! int32       4 bytes   two's-complement
//! int64       8 bytes   two's-complement
//! byte        1 byte    raw, signed
//! float32     4 bytes   IEEE-754
//! float64     8 bytes   IEEE-754
//! boolean     1 byte    0x00 / 0x01
//! char8       1 byte    low byte of the character
//! char16      2 bytes   UTF-16 code unit
//! utf8string  2 + N     ┌─────────┬────────────────┐
//!                       │ Len (2) │ UTF-8 (Len)    │
//!                       └─────────┴────────────────┘
//! bytestring  N + 1     ┌────────────────┬──────┐
//!                       │ bytes (N)      │ 0x00 │
//!                       └────────────────┴──────┘
//! ```

mod tag;
mod value;
mod wire;

pub use tag::{TagInfo, TypeTag, TAGS};
pub use value::Value;
pub use wire::{
    encode_and_send, encode_value, read_and_decode, read_and_decode_buffered, write_value,
    MAX_UTF8_LEN, SENTINEL,
};
