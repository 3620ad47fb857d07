use std::{fmt, str::FromStr};

use thiserror::Error;

/// The byte order used for every multi-byte field on the wire.
///
/// Little-endian is the default. The order is an ordinary value: pass it to the
/// encode/decode entry points directly, or keep it in a [`Codec`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ByteOrder {
    #[default]
    LittleEndian,
    BigEndian,
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LittleEndian => "little-endian",
            Self::BigEndian => "big-endian",
        })
    }
}

impl FromStr for ByteOrder {
    type Err = ParseByteOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "little" | "le" | "little-endian" => Ok(Self::LittleEndian),
            "big" | "be" | "big-endian" => Ok(Self::BigEndian),
            _ => Err(ParseByteOrderError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Returned when a string does not name a [`ByteOrder`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown byte order {input:?}, expected little-endian or big-endian")]
pub struct ParseByteOrderError {
    pub input: String,
}

/// Encoding context.
///
/// A `Codec` holds the configuration shared by a group of encode/decode calls.
/// Today that is only the [`ByteOrder`]; the framing operations are available
/// as methods (see [`crate::frame`]).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Codec {
    pub order: ByteOrder,
}

impl Codec {
    pub const fn new(order: ByteOrder) -> Self {
        Self { order }
    }

    pub const fn little_endian() -> Self {
        Self::new(ByteOrder::LittleEndian)
    }

    pub const fn big_endian() -> Self {
        Self::new(ByteOrder::BigEndian)
    }
}
