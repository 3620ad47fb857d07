use std::str::Utf8Error;

use thiserror::Error;

use crate::order::ByteOrder;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    type_name: &'static str,
}

impl DecodeError {
    pub fn new<T: ?Sized>(kind: DecodeErrorKind) -> Self {
        Self {
            kind,
            type_name: std::any::type_name::<T>(),
        }
    }

    pub const fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    /// Name of the type that failed to decode.
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to decode {}: {}", self.type_name, self.kind)
    }
}

#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeErrorKind {
    #[error("Not enough data. Required {required} bytes, {available} available.")]
    InsufficientData { required: usize, available: usize },

    #[error("Unsupported envelope version {found}.")]
    VersionMismatch { found: u32 },

    #[error("CRC16 checksum mismatch. Found {value:x}, expected {expected:x}.")]
    ChecksumMismatch { value: u16, expected: u16 },

    #[error("String contained invalid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),
}

/// A type that can be reconstructed (decoded) from a raw sequence of bytes.
///
/// The input slice is advanced by the number of bytes consumed, so a caller can
/// decode several values back to back from one buffer and learn how much was
/// read by comparing lengths.
pub trait Decode {
    /// Attempts to decode `Self` from the beginning of the provided byte slice.
    ///
    /// Multi-byte fields are read in the given byte order.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the input is malformed or too short to hold
    /// a complete value of this type. `data` is left untouched on error.
    fn decode(data: &mut &[u8], order: ByteOrder) -> Result<Self, DecodeError>
    where
        Self: Sized;
}

/// Splits `len` bytes off the front of `data`.
///
/// Errors are attributed to `T`.
pub(crate) fn take<'a, T: ?Sized>(
    data: &mut &'a [u8],
    len: usize,
) -> Result<&'a [u8], DecodeError> {
    if data.len() < len {
        return Err(DecodeError::new::<T>(DecodeErrorKind::InsufficientData {
            required: len,
            available: data.len(),
        }));
    }

    let (head, tail) = data.split_at(len);
    *data = tail;
    Ok(head)
}

#[cfg(test)]
mod tests {
    use super::{take, DecodeError, DecodeErrorKind};

    #[test]
    fn take_advances() {
        let mut data: &[u8] = &[1, 2, 3];
        assert_eq!(take::<u16>(&mut data, 2).unwrap(), &[1, 2]);
        assert_eq!(data, &[3]);
    }

    #[test]
    fn take_short() {
        let mut data: &[u8] = &[1, 2, 3];
        let err = take::<u32>(&mut data, 4).unwrap_err();

        assert_eq!(
            err.kind(),
            DecodeErrorKind::InsufficientData {
                required: 4,
                available: 3
            }
        );
        assert_eq!(err.type_name(), "u32");
        // Nothing consumed.
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn display() {
        let err = DecodeError::new::<u8>(DecodeErrorKind::VersionMismatch { found: 7 });
        assert_eq!(err.to_string(), "Failed to decode u8: Unsupported envelope version 7.");
    }
}
