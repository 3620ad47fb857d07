//! Fixed-width integer and float codec.
//!
//! Every supported kind is a variant of [`Primitive`], so encoding and decoding
//! dispatch through an exhaustive `match` instead of inspecting types at runtime.
//! The plain Rust types (`u8`, `i16`, `f64`, ...) also implement [`Encode`] and
//! [`Decode`] directly.

use std::mem::size_of;

use crate::{
    decode::{take, Decode, DecodeError},
    encode::{Encode, EncodeError},
    order::ByteOrder,
};

/// The kind (width and signedness) of a [`Primitive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
}

impl PrimitiveKind {
    /// Number of bytes a value of this kind occupies on the wire.
    pub const fn size(self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::F64 => 8,
        }
    }
}

/// A single fixed-width value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl Primitive {
    pub const fn kind(&self) -> PrimitiveKind {
        match self {
            Self::U8(_) => PrimitiveKind::U8,
            Self::I8(_) => PrimitiveKind::I8,
            Self::U16(_) => PrimitiveKind::U16,
            Self::I16(_) => PrimitiveKind::I16,
            Self::U32(_) => PrimitiveKind::U32,
            Self::I32(_) => PrimitiveKind::I32,
            Self::U64(_) => PrimitiveKind::U64,
            Self::I64(_) => PrimitiveKind::I64,
            Self::F32(_) => PrimitiveKind::F32,
            Self::F64(_) => PrimitiveKind::F64,
        }
    }

    /// Number of bytes this value occupies on the wire.
    pub const fn size(&self) -> usize {
        self.kind().size()
    }

    /// Appends the encoded value to `out`.
    pub fn encode_into(&self, order: ByteOrder, out: &mut Vec<u8>) {
        match *self {
            Self::U8(v) => v.put(order, out),
            Self::I8(v) => v.put(order, out),
            Self::U16(v) => v.put(order, out),
            Self::I16(v) => v.put(order, out),
            Self::U32(v) => v.put(order, out),
            Self::I32(v) => v.put(order, out),
            Self::U64(v) => v.put(order, out),
            Self::I64(v) => v.put(order, out),
            Self::F32(v) => v.to_bits().put(order, out),
            Self::F64(v) => v.to_bits().put(order, out),
        }
    }

    pub fn to_bytes(&self, order: ByteOrder) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        self.encode_into(order, &mut out);
        out
    }

    /// Decodes a value of the given kind from the start of `data`.
    ///
    /// # Errors
    ///
    /// Returns an `InsufficientData` error if `data` is shorter than `kind.size()`.
    pub fn decode(kind: PrimitiveKind, data: &[u8], order: ByteOrder) -> Result<Self, DecodeError> {
        let mut data = data;
        let data = &mut data;

        Ok(match kind {
            PrimitiveKind::U8 => Self::U8(u8::decode(data, order)?),
            PrimitiveKind::I8 => Self::I8(i8::decode(data, order)?),
            PrimitiveKind::U16 => Self::U16(u16::decode(data, order)?),
            PrimitiveKind::I16 => Self::I16(i16::decode(data, order)?),
            PrimitiveKind::U32 => Self::U32(u32::decode(data, order)?),
            PrimitiveKind::I32 => Self::I32(i32::decode(data, order)?),
            PrimitiveKind::U64 => Self::U64(u64::decode(data, order)?),
            PrimitiveKind::I64 => Self::I64(i64::decode(data, order)?),
            PrimitiveKind::F32 => Self::F32(f32::decode(data, order)?),
            PrimitiveKind::F64 => Self::F64(f64::decode(data, order)?),
        })
    }

    /// Overwrites `self` with a value of the same kind decoded from `data`.
    ///
    /// Returns the number of bytes consumed so callers can chain reads over
    /// one buffer. `self` is unchanged on error.
    pub fn decode_in_place(&mut self, data: &[u8], order: ByteOrder) -> Result<usize, DecodeError> {
        *self = Self::decode(self.kind(), data, order)?;
        Ok(self.size())
    }
}

/// Byte-order aware conversion for the integer widths.
trait WireInt: Sized {
    fn put(self, order: ByteOrder, out: &mut Vec<u8>);
    fn get(bytes: &[u8], order: ByteOrder) -> Self;
}

macro_rules! impl_wire_int {
    ($($t:ty),*) => {
        $(
            impl WireInt for $t {
                fn put(self, order: ByteOrder, out: &mut Vec<u8>) {
                    match order {
                        ByteOrder::LittleEndian => out.extend_from_slice(&self.to_le_bytes()),
                        ByteOrder::BigEndian => out.extend_from_slice(&self.to_be_bytes()),
                    }
                }

                fn get(bytes: &[u8], order: ByteOrder) -> Self {
                    let mut raw = [0; size_of::<$t>()];
                    raw.copy_from_slice(&bytes[..size_of::<$t>()]);
                    match order {
                        ByteOrder::LittleEndian => Self::from_le_bytes(raw),
                        ByteOrder::BigEndian => Self::from_be_bytes(raw),
                    }
                }
            }
        )*
    };
}

impl_wire_int!(u8, i8, u16, i16, u32, i32, u64, i64);

macro_rules! impl_codec_for_int {
    ($($t:ident => $variant:ident),*) => {
        $(
            impl From<$t> for Primitive {
                fn from(value: $t) -> Self {
                    Self::$variant(value)
                }
            }

            impl Encode for $t {
                fn encode(&self, order: ByteOrder) -> Result<Vec<u8>, EncodeError> {
                    Ok(Primitive::$variant(*self).to_bytes(order))
                }
            }

            impl Decode for $t {
                fn decode(data: &mut &[u8], order: ByteOrder) -> Result<Self, DecodeError> {
                    let bytes = take::<Self>(data, size_of::<Self>())?;
                    Ok(<$t as WireInt>::get(bytes, order))
                }
            }
        )*
    };
}

impl_codec_for_int!(
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    u64 => U64,
    i64 => I64
);

// Floats travel as the raw bit pattern of the same-width unsigned integer.
macro_rules! impl_codec_for_float {
    ($($t:ident => $variant:ident as $bits:ident),*) => {
        $(
            impl From<$t> for Primitive {
                fn from(value: $t) -> Self {
                    Self::$variant(value)
                }
            }

            impl Encode for $t {
                fn encode(&self, order: ByteOrder) -> Result<Vec<u8>, EncodeError> {
                    Ok(Primitive::$variant(*self).to_bytes(order))
                }
            }

            impl Decode for $t {
                fn decode(data: &mut &[u8], order: ByteOrder) -> Result<Self, DecodeError> {
                    let bytes = take::<Self>(data, size_of::<Self>())?;
                    Ok(<$t>::from_bits(<$bits as WireInt>::get(bytes, order)))
                }
            }
        )*
    };
}

impl_codec_for_float!(f32 => F32 as u32, f64 => F64 as u64);

#[cfg(test)]
mod tests {
    use super::{Primitive, PrimitiveKind};
    use crate::{
        decode::{Decode, DecodeErrorKind},
        encode::Encode,
        order::ByteOrder::{BigEndian, LittleEndian},
    };

    #[test]
    fn encode_little_endian() {
        assert_eq!(0x55u8.encode(LittleEndian).unwrap(), [0x55]);
        assert_eq!((-1i8).encode(LittleEndian).unwrap(), [0xFF]);
        assert_eq!((-1i16).encode(LittleEndian).unwrap(), [0xFF, 0xFF]);
        assert_eq!(65535u16.encode(LittleEndian).unwrap(), [0xFF, 0xFF]);
        assert_eq!(1i32.encode(LittleEndian).unwrap(), [0x01, 0x00, 0x00, 0x00]);
        assert_eq!((-1i32).encode(LittleEndian).unwrap(), [0xFF; 4]);
        assert_eq!(u32::MAX.encode(LittleEndian).unwrap(), [0xFF; 4]);
        assert_eq!((-1i64).encode(LittleEndian).unwrap(), [0xFF; 8]);
        assert_eq!(u64::MAX.encode(LittleEndian).unwrap(), [0xFF; 8]);
        assert_eq!(1.234f32.encode(LittleEndian).unwrap(), [0xB6, 0xF3, 0x9D, 0x3F]);
        assert_eq!(
            1.234f64.encode(LittleEndian).unwrap(),
            [0x58, 0x39, 0xB4, 0xC8, 0x76, 0xBE, 0xF3, 0x3F]
        );
    }

    #[test]
    fn encode_big_endian() {
        assert_eq!(1i32.encode(BigEndian).unwrap(), [0x00, 0x00, 0x00, 0x01]);
        assert_eq!(0x0102u16.encode(BigEndian).unwrap(), [0x01, 0x02]);
        assert_eq!(1.234f32.encode(BigEndian).unwrap(), [0x3F, 0x9D, 0xF3, 0xB6]);
    }

    #[test]
    fn decode_advances() {
        let data = [0xFF, 0xFF, 0xAA, 0x01];
        let mut cursor = data.as_slice();

        assert_eq!(i16::decode(&mut cursor, LittleEndian).unwrap(), -1);
        assert_eq!(u8::decode(&mut cursor, LittleEndian).unwrap(), 0xAA);
        assert_eq!(cursor, &[0x01]);
    }

    #[test]
    fn decode_floats() {
        let mut data = [0xB6, 0xF3, 0x9D, 0x3F].as_slice();
        let v = f32::decode(&mut data, LittleEndian).unwrap();
        assert!((v - 1.234).abs() <= f32::EPSILON);

        let mut data = [0x3F, 0xF3, 0xBE, 0x76, 0xC8, 0xB4, 0x39, 0x58].as_slice();
        assert_eq!(f64::decode(&mut data, BigEndian).unwrap(), 1.234);
    }

    #[test]
    fn decode_in_place_uses_current_kind() {
        let mut value = Primitive::I32(0);
        let consumed = value
            .decode_in_place(&[0xFF, 0xFF, 0xFF, 0xFF, 0x00], LittleEndian)
            .unwrap();

        assert_eq!(consumed, 4);
        assert_eq!(value, Primitive::I32(-1));

        let mut value = Primitive::U32(0);
        value.decode_in_place(&[0xFF; 4], LittleEndian).unwrap();
        assert_eq!(value, Primitive::U32(u32::MAX));
    }

    #[test]
    fn short_input() {
        let mut value = Primitive::U64(7);
        let err = value.decode_in_place(&[0; 7], LittleEndian).unwrap_err();

        assert_eq!(
            err.kind(),
            DecodeErrorKind::InsufficientData {
                required: 8,
                available: 7
            }
        );
        assert_eq!(value, Primitive::U64(7));

        assert!(Primitive::decode(PrimitiveKind::U8, &[], LittleEndian).is_err());
    }

    #[test]
    fn every_kind_has_its_width() {
        let values = [
            Primitive::from(1u8),
            Primitive::from(1i8),
            Primitive::from(1u16),
            Primitive::from(1i16),
            Primitive::from(1u32),
            Primitive::from(1i32),
            Primitive::from(1u64),
            Primitive::from(1i64),
            Primitive::from(1f32),
            Primitive::from(1f64),
        ];

        for value in values {
            for order in [LittleEndian, BigEndian] {
                let bytes = value.to_bytes(order);
                assert_eq!(bytes.len(), value.kind().size());
                assert_eq!(Primitive::decode(value.kind(), &bytes, order).unwrap(), value);
            }
        }
    }
}
