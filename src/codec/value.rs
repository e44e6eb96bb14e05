//! Typed values
//!
//! A [`Value`] is one primitive as it travels on the wire. Values are built
//! either from an operator literal ([`Value::parse`]) or by decoding bytes.

use std::fmt;

use super::wire::MAX_UTF8_LEN;
use super::TypeTag;
use crate::error::{ProbeError, Result};

/// A single wire value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int32(i32),
    Int64(i64),
    Byte(i8),
    Float32(f32),
    Float64(f64),
    Boolean(bool),

    /// One byte, shown as a Latin-1 character
    Char8(u8),

    /// One UTF-16 code unit
    Char16(u16),

    Utf8String(String),

    /// Raw bytes without the trailing sentinel
    ByteString(Vec<u8>),
}

impl Value {
    /// The tag this value encodes as
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Int32(_) => TypeTag::Int32,
            Value::Int64(_) => TypeTag::Int64,
            Value::Byte(_) => TypeTag::Byte,
            Value::Float32(_) => TypeTag::Float32,
            Value::Float64(_) => TypeTag::Float64,
            Value::Boolean(_) => TypeTag::Boolean,
            Value::Char8(_) => TypeTag::Char8,
            Value::Char16(_) => TypeTag::Char16,
            Value::Utf8String(_) => TypeTag::Utf8String,
            Value::ByteString(_) => TypeTag::ByteString,
        }
    }

    /// Parse an operator literal under the grammar of `tag`
    pub fn parse(tag: TypeTag, literal: &str) -> Result<Value> {
        let invalid = |reason: &dyn fmt::Display| ProbeError::literal(tag, literal, reason);

        let value = match tag {
            TypeTag::Int32 => Value::Int32(literal.parse().map_err(|e| invalid(&e))?),
            TypeTag::Int64 => Value::Int64(literal.parse().map_err(|e| invalid(&e))?),
            TypeTag::Byte => Value::Byte(literal.parse().map_err(|e| invalid(&e))?),
            TypeTag::Float32 => Value::Float32(literal.parse().map_err(|e| invalid(&e))?),
            TypeTag::Float64 => Value::Float64(literal.parse().map_err(|e| invalid(&e))?),
            TypeTag::Boolean => {
                if literal.eq_ignore_ascii_case("true") {
                    Value::Boolean(true)
                } else if literal.eq_ignore_ascii_case("false") {
                    Value::Boolean(false)
                } else {
                    return Err(invalid(&"expected true or false"));
                }
            }
            TypeTag::Char8 => {
                let c = single_char(tag, literal)?;
                // Low byte only
                Value::Char8(c as u32 as u8)
            }
            TypeTag::Char16 => {
                let c = single_char(tag, literal)?;
                let mut units = [0u16; 2];
                match c.encode_utf16(&mut units) {
                    [unit] => Value::Char16(*unit),
                    _ => return Err(invalid(&"character does not fit in one UTF-16 code unit")),
                }
            }
            TypeTag::Utf8String => {
                if literal.len() > MAX_UTF8_LEN {
                    return Err(ProbeError::StringTooLong {
                        len: literal.len(),
                        max: MAX_UTF8_LEN,
                    });
                }
                Value::Utf8String(literal.to_string())
            }
            TypeTag::ByteString => {
                if literal.contains('\0') {
                    return Err(invalid(&"embedded NUL collides with the terminating sentinel"));
                }
                Value::ByteString(literal.chars().map(|c| c as u32 as u8).collect())
            }
        };

        Ok(value)
    }
}

fn single_char(tag: TypeTag, literal: &str) -> Result<char> {
    let mut chars = literal.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ProbeError::literal(
            tag,
            literal,
            format!("expected exactly 1 character, got {}", literal.chars().count()),
        )),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Byte(v) => write!(f, "{}", v),
            // Debug keeps the fractional part: 1.0 rather than 1
            Value::Float32(v) => write!(f, "{:?}", v),
            Value::Float64(v) => write!(f, "{:?}", v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Char8(b) => write!(f, "{}", char::from(*b)),
            Value::Char16(unit) => match char::decode_utf16([*unit]).next() {
                Some(Ok(c)) => write!(f, "{}", c),
                _ => write!(f, "\\u{{{:04x}}}", unit),
            },
            Value::Utf8String(s) => f.write_str(s),
            Value::ByteString(bytes) => {
                for b in bytes {
                    write!(f, "{}", char::from(*b))?;
                }
                Ok(())
            }
        }
    }
}
