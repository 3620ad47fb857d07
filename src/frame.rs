//! Length-prefixed framing.
//!
//! Strings are framed with a `u16` length and objects with a `u32` length, so a
//! reader can step over heterogeneous values in one buffer without any external
//! delimiters. Any checksum or version tag an object carries lives inside its
//! payload; the frame itself is only the length.
//!
//! # Object frame
//!
//! | Field     | Size | Description |
//! |-----------|------|-------------|
//! | `len`     | 4    | Size of `payload`. |
//! | `payload` | n    | The object's own [`Encode`] output. |

use log::{debug, trace};

use crate::{
    decode::{take, Decode, DecodeError},
    encode::{check_len, Encode, EncodeError},
    order::{ByteOrder, Codec},
    primitive::{Primitive, PrimitiveKind},
};

/// Size of the length prefix in front of a framed object.
pub const OBJECT_LEN_PREFIX_SIZE: usize = 4;

/// A value wrapped in an object frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Framed<T>(pub T);

impl<T> Framed<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Encode> Encode for Framed<T> {
    fn encode(&self, order: ByteOrder) -> Result<Vec<u8>, EncodeError> {
        let payload = self.0.encode(order)?;
        check_len(payload.len(), u32::MAX as usize)?;

        let mut out = Vec::with_capacity(OBJECT_LEN_PREFIX_SIZE + payload.len());
        out.extend((payload.len() as u32).encode(order)?);
        out.extend(payload);

        trace!("framed {}: {:x?}", std::any::type_name::<T>(), out);
        Ok(out)
    }
}

impl<T: Decode> Decode for Framed<T> {
    /// Consumes the whole frame even if `T` does not need every payload byte.
    fn decode(data: &mut &[u8], order: ByteOrder) -> Result<Self, DecodeError> {
        let mut cursor = *data;
        let len = u32::decode(&mut cursor, order).map_err(|e| DecodeError::new::<Self>(e.kind()))?;
        let mut payload = take::<Self>(&mut cursor, len as usize)?;

        let value = T::decode(&mut payload, order)
            .inspect_err(|e| debug!("framed payload rejected: {}", e))?;

        *data = cursor;
        Ok(Self(value))
    }
}

/// Encodes `s` as `[u16 len][utf8 bytes]`.
pub fn encode_string(s: &str, order: ByteOrder) -> Result<Vec<u8>, EncodeError> {
    s.encode(order)
}

/// Decodes a string written by [`encode_string`].
///
/// Returns the string and the number of bytes consumed.
pub fn decode_string(data: &[u8], order: ByteOrder) -> Result<(String, usize), DecodeError> {
    let mut cursor = data;
    let s = String::decode(&mut cursor, order)?;
    Ok((s, data.len() - cursor.len()))
}

/// Encodes `value` and prefixes the result with its `u32` length.
///
/// # Errors
///
/// Propagates any error from `value`'s own encoding.
pub fn encode_object<T: Encode + ?Sized>(
    value: &T,
    order: ByteOrder,
) -> Result<Vec<u8>, EncodeError> {
    Framed(value).encode(order)
}

/// Decodes a framed object into `target`.
///
/// Returns `4 + len`, the size of the whole frame. If the payload does not
/// decode as a `T`, the error is returned and `target` is left unchanged.
pub fn decode_object<T: Decode>(
    target: &mut T,
    data: &[u8],
    order: ByteOrder,
) -> Result<usize, DecodeError> {
    let mut cursor = data;
    *target = Framed::<T>::decode(&mut cursor, order)?.into_inner();
    Ok(data.len() - cursor.len())
}

impl Codec {
    pub fn encode<T: Encode + ?Sized>(&self, value: &T) -> Result<Vec<u8>, EncodeError> {
        value.encode(self.order)
    }

    /// Decodes a `T` from the start of `data`, returning it with the number of
    /// bytes consumed.
    pub fn decode<T: Decode>(&self, data: &[u8]) -> Result<(T, usize), DecodeError> {
        let mut cursor = data;
        let value = T::decode(&mut cursor, self.order)?;
        Ok((value, data.len() - cursor.len()))
    }

    pub fn encode_string(&self, s: &str) -> Result<Vec<u8>, EncodeError> {
        encode_string(s, self.order)
    }

    pub fn decode_string(&self, data: &[u8]) -> Result<(String, usize), DecodeError> {
        decode_string(data, self.order)
    }

    pub fn encode_object<T: Encode + ?Sized>(&self, value: &T) -> Result<Vec<u8>, EncodeError> {
        encode_object(value, self.order)
    }

    pub fn decode_object<T: Decode>(
        &self,
        target: &mut T,
        data: &[u8],
    ) -> Result<usize, DecodeError> {
        decode_object(target, data, self.order)
    }

    pub fn writer(&self) -> MessageWriter {
        MessageWriter::new(self.order)
    }

    pub fn reader<'a>(&self, data: &'a [u8]) -> MessageReader<'a> {
        MessageReader::new(data, self.order)
    }
}

/// Builds a message out of consecutive fields.
///
/// ```
/// use byteframe::{ByteOrder, MessageReader, MessageWriter, Number};
///
/// let mut writer = MessageWriter::new(ByteOrder::LittleEndian);
/// writer.write_primitive(7u16);
/// writer.write_string("temp").unwrap();
/// writer.write_object(&Number::from(21.5)).unwrap();
/// let message = writer.finish();
///
/// let mut reader = MessageReader::new(&message, ByteOrder::LittleEndian);
/// assert_eq!(reader.read::<u16>().unwrap(), 7);
/// assert_eq!(reader.read_string().unwrap(), "temp");
/// assert_eq!(reader.read_object::<Number>().unwrap(), 21.5);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct MessageWriter {
    order: ByteOrder,
    data: Vec<u8>,
}

impl MessageWriter {
    pub fn new(order: ByteOrder) -> Self {
        Self {
            order,
            data: Vec::new(),
        }
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Appends a fixed-width value.
    pub fn write_primitive(&mut self, value: impl Into<Primitive>) -> &mut Self {
        value.into().encode_into(self.order, &mut self.data);
        self
    }

    /// Appends `value`'s own encoding with no frame around it.
    pub fn write<T: Encode + ?Sized>(&mut self, value: &T) -> Result<&mut Self, EncodeError> {
        self.data.extend(value.encode(self.order)?);
        Ok(self)
    }

    pub fn write_string(&mut self, s: &str) -> Result<&mut Self, EncodeError> {
        self.write(s)
    }

    /// Appends `value` inside an object frame.
    pub fn write_object<T: Encode + ?Sized>(
        &mut self,
        value: &T,
    ) -> Result<&mut Self, EncodeError> {
        self.write(&Framed(value))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn finish(self) -> Vec<u8> {
        self.data
    }
}

/// Reads consecutive fields back out of a message.
///
/// A failed read consumes nothing, so the caller may retry with a different
/// field type.
#[derive(Debug, Clone, Copy)]
pub struct MessageReader<'a> {
    order: ByteOrder,
    data: &'a [u8],
    remaining: &'a [u8],
}

impl<'a> MessageReader<'a> {
    pub fn new(data: &'a [u8], order: ByteOrder) -> Self {
        Self {
            order,
            data,
            remaining: data,
        }
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.data.len() - self.remaining.len()
    }

    pub fn remaining(&self) -> &'a [u8] {
        self.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn read<T: Decode>(&mut self) -> Result<T, DecodeError> {
        T::decode(&mut self.remaining, self.order)
    }

    pub fn read_primitive(&mut self, kind: PrimitiveKind) -> Result<Primitive, DecodeError> {
        let value = Primitive::decode(kind, self.remaining, self.order)?;
        self.remaining = &self.remaining[kind.size()..];
        Ok(value)
    }

    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        self.read()
    }

    /// Reads an object frame, skipping any payload bytes `T` leaves unread.
    pub fn read_object<T: Decode>(&mut self) -> Result<T, DecodeError> {
        Ok(self.read::<Framed<T>>()?.into_inner())
    }
}
