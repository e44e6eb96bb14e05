//! Type tags
//!
//! Every supported wire type is one row in [`TAGS`]. Adding a type means adding
//! a variant, a row, and its arms in `Value` and the wire functions.

use std::fmt;
use std::str::FromStr;

use crate::error::{ProbeError, Result};

/// Supported wire types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeTag {
    Int32 = 0,
    Int64 = 1,
    Byte = 2,
    Float32 = 3,
    Float64 = 4,
    Boolean = 5,
    Char8 = 6,
    Char16 = 7,
    Utf8String = 8,
    ByteString = 9,
}

/// Static description of one tag
#[derive(Debug)]
pub struct TagInfo {
    pub tag: TypeTag,

    /// Canonical name, used for display
    pub name: &'static str,

    /// Other accepted spellings
    pub aliases: &'static [&'static str],

    /// Encoded size in bytes, `None` for variable-length tags
    pub width: Option<usize>,
}

/// Tag table, indexed by discriminant
pub static TAGS: [TagInfo; 10] = [
    TagInfo { tag: TypeTag::Int32, name: "int32", aliases: &["int"], width: Some(4) },
    TagInfo { tag: TypeTag::Int64, name: "int64", aliases: &["long"], width: Some(8) },
    TagInfo { tag: TypeTag::Byte, name: "byte", aliases: &[], width: Some(1) },
    TagInfo { tag: TypeTag::Float32, name: "float32", aliases: &["float"], width: Some(4) },
    TagInfo { tag: TypeTag::Float64, name: "float64", aliases: &["double"], width: Some(8) },
    TagInfo { tag: TypeTag::Boolean, name: "boolean", aliases: &["bool"], width: Some(1) },
    TagInfo { tag: TypeTag::Char8, name: "char8", aliases: &["char"], width: Some(1) },
    TagInfo { tag: TypeTag::Char16, name: "char16", aliases: &[], width: Some(2) },
    TagInfo { tag: TypeTag::Utf8String, name: "utf8string", aliases: &["utfstring", "string"], width: None },
    TagInfo { tag: TypeTag::ByteString, name: "bytestring", aliases: &[], width: None },
];

impl TypeTag {
    /// All tags in table order
    pub fn all() -> impl Iterator<Item = TypeTag> {
        TAGS.iter().map(|info| info.tag)
    }

    pub fn info(self) -> &'static TagInfo {
        &TAGS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Fixed encoded size, if any
    pub fn width(self) -> Option<usize> {
        self.info().width
    }

    fn matches(self, name: &str) -> bool {
        let info = self.info();
        info.name.eq_ignore_ascii_case(name)
            || info.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

impl FromStr for TypeTag {
    type Err = ProbeError;

    /// Case-insensitive lookup by name or alias
    fn from_str(s: &str) -> Result<Self> {
        TypeTag::all()
            .find(|tag| tag.matches(s))
            .ok_or_else(|| ProbeError::UnknownType(s.to_string()))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
