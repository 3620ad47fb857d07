//! A double-backed numeric value with checked construction and truncating conversions.

use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, Div, Mul, Neg, Sub},
};

use log::{debug, trace};
use thiserror::Error;

use crate::{
    crc,
    decode::{Decode, DecodeError, DecodeErrorKind},
    encode::{Encode, EncodeError},
    order::ByteOrder,
    primitive::Primitive,
};

/// Largest signed integer accepted by [`Number::new`].
///
/// A double has a 53-bit significand, so integers beyond roughly 16 decimal
/// digits no longer survive the round trip.
pub const MAX_INT_NUMBER: i64 = 10_000_000_000_000_000;

/// Smallest signed integer accepted by [`Number::new`].
pub const MIN_INT_NUMBER: i64 = -10_000_000_000_000_000;

/// Largest unsigned integer accepted by [`Number::new`].
pub const MAX_UINT_NUMBER: u64 = 10_000_000_000_000_000;

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// A general-purpose numeric value stored as an `f64`.
///
/// Integers are range-checked on the way in so that every integer a `Number`
/// holds converts back exactly. Getting a fixed-width integer back out is an
/// explicit, truncating conversion (`to_u8`, `to_i32`, ...), which behaves like a
/// native cast: truncate toward zero, then wrap to the target width.
///
/// # Encoding
///
/// | Field     | Size | Description |
/// |-----------|------|-------------|
/// | `version` | 4    | Envelope version, always `0`. |
/// | `value`   | 8    | IEEE 754 bit pattern of the value. |
/// | `crc16`   | 2    | Little-endian CRC16 of the preceding 12 bytes, see [`crc::CRC16`]. |
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Number(f64);

impl Number {
    /// Envelope version written by [`Encode`].
    pub const VERSION: u32 = 0;

    /// Size of a version 0 envelope.
    pub const ENVELOPE_SIZE: usize = 4 + 8 + 2;

    pub const MAX: Self = Self(f64::MAX);
    pub const MIN: Self = Self(f64::MIN);

    /// Creates a `Number` from any primitive value.
    ///
    /// Floats are taken as-is (`f32` is widened).
    ///
    /// # Errors
    ///
    /// Returns [`PrecisionLossError`] for an `i64` outside
    /// `[MIN_INT_NUMBER, MAX_INT_NUMBER]` or a `u64` above `MAX_UINT_NUMBER`.
    pub fn new(value: impl Into<Primitive>) -> Result<Self, PrecisionLossError> {
        Self::try_from(value.into())
    }

    /// Wraps an `f64` without any checks.
    pub const fn from_f64(value: f64) -> Self {
        Self(value)
    }

    pub fn to_i8(self) -> i8 {
        self.to_i64() as i8
    }

    pub fn to_u8(self) -> u8 {
        self.to_u64() as u8
    }

    pub fn to_i16(self) -> i16 {
        self.to_i64() as i16
    }

    pub fn to_u16(self) -> u16 {
        self.to_u64() as u16
    }

    pub fn to_i32(self) -> i32 {
        self.to_i64() as i32
    }

    pub fn to_u32(self) -> u32 {
        self.to_u64() as u32
    }

    /// Truncates toward zero. NaN, infinities and values outside the `i64`
    /// range become `0`.
    pub fn to_i64(self) -> i64 {
        if self.0 >= -TWO_POW_63 && self.0 < TWO_POW_63 {
            self.0 as i64
        } else {
            0
        }
    }

    /// Truncates toward zero. Negative values wrap through their `i64`
    /// representation (`-1.0` becomes `u64::MAX`); NaN, infinities and values
    /// outside both integer ranges become `0`.
    pub fn to_u64(self) -> u64 {
        if self.0 >= -TWO_POW_63 && self.0 < TWO_POW_63 {
            self.0 as i64 as u64
        } else if self.0 >= TWO_POW_63 && self.0 < TWO_POW_64 {
            self.0 as u64
        } else {
            0
        }
    }

    pub fn to_f32(self) -> f32 {
        self.0 as f32
    }

    pub fn to_f64(self) -> f64 {
        self.0
    }
}

/// Returned when an integer is too large in magnitude to be held exactly by a [`Number`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error(
    "integer {value} is outside [{}, {}] and would lose precision as a Number",
    MIN_INT_NUMBER,
    MAX_INT_NUMBER
)]
pub struct PrecisionLossError {
    pub value: i128,
}

impl TryFrom<Primitive> for Number {
    type Error = PrecisionLossError;

    fn try_from(value: Primitive) -> Result<Self, Self::Error> {
        Ok(Self(match value {
            Primitive::U8(v) => v.into(),
            Primitive::I8(v) => v.into(),
            Primitive::U16(v) => v.into(),
            Primitive::I16(v) => v.into(),
            Primitive::U32(v) => v.into(),
            Primitive::I32(v) => v.into(),
            Primitive::I64(v) => {
                if !(MIN_INT_NUMBER..=MAX_INT_NUMBER).contains(&v) {
                    return Err(PrecisionLossError { value: v.into() });
                }
                v as f64
            }
            Primitive::U64(v) => {
                if v > MAX_UINT_NUMBER {
                    return Err(PrecisionLossError { value: v.into() });
                }
                v as f64
            }
            Primitive::F32(v) => v.into(),
            Primitive::F64(v) => v,
        }))
    }
}

macro_rules! impl_from_lossless {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(value: $t) -> Self {
                    Self(value.into())
                }
            }
        )*
    };
}

impl_from_lossless!(u8, i8, u16, i16, u32, i32, f32, f64);

impl TryFrom<i64> for Number {
    type Error = PrecisionLossError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<u64> for Number {
    type Error = PrecisionLossError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Number> for f64 {
    fn from(value: Number) -> Self {
        value.0
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl PartialEq<f64> for Number {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<f64> for Number {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

macro_rules! impl_arith {
    ($($trait:ident::$method:ident => $op:tt),*) => {
        $(
            impl $trait for Number {
                type Output = Self;

                fn $method(self, rhs: Self) -> Self {
                    Self(self.0 $op rhs.0)
                }
            }
        )*
    };
}

impl_arith!(Add::add => +, Sub::sub => -, Mul::mul => *, Div::div => /);

impl Neg for Number {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Encode for Number {
    fn encode(&self, order: ByteOrder) -> Result<Vec<u8>, EncodeError> {
        let mut body = Vec::with_capacity(Self::ENVELOPE_SIZE);
        body.extend(Self::VERSION.encode(order)?);
        body.extend(self.0.encode(order)?);

        let envelope = crc::append_crc16(body);
        trace!("encoded number {}: {:x?}", self.0, envelope);
        Ok(envelope)
    }
}

impl Decode for Number {
    /// Decodes one envelope and advances `data` past it. Bytes after the
    /// envelope are left for the caller.
    fn decode(data: &mut &[u8], order: ByteOrder) -> Result<Self, DecodeError> {
        let mut cursor = *data;
        let version =
            u32::decode(&mut cursor, order).map_err(|e| DecodeError::new::<Self>(e.kind()))?;
        let envelope = data.get(..Self::ENVELOPE_SIZE);

        if version != Self::VERSION {
            // A full-length envelope with a bad checksum is a corrupted v0
            // envelope, not a newer one.
            if let Some(envelope) = envelope {
                verify_envelope(envelope)?;
            }

            debug!("unsupported number envelope version {}", version);
            return Err(DecodeError::new::<Self>(DecodeErrorKind::VersionMismatch {
                found: version,
            }));
        }

        let envelope = envelope.ok_or_else(|| {
            DecodeError::new::<Self>(DecodeErrorKind::InsufficientData {
                required: Self::ENVELOPE_SIZE,
                available: data.len(),
            })
        })?;
        verify_envelope(envelope)?;

        let value = f64::decode(&mut &envelope[4..12], order)?;
        *data = &data[Self::ENVELOPE_SIZE..];
        Ok(Self(value))
    }
}

fn verify_envelope(envelope: &[u8]) -> Result<(), DecodeError> {
    let expected = crc::crc16(&envelope[..12]);
    let value = u16::from_le_bytes([envelope[12], envelope[13]]);

    if value != expected {
        debug!("number envelope checksum mismatch: {:x?}", envelope);
        return Err(DecodeError::new::<Number>(DecodeErrorKind::ChecksumMismatch {
            value,
            expected,
        }));
    }
    Ok(())
}
