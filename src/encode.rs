use thiserror::Error;

use crate::order::ByteOrder;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Length {len} does not fit in its prefix (max {max})")]
    LengthOverflow { len: usize, max: usize },
    #[error("Value cannot be encoded: {0}")]
    InvalidValue(String),
}

/// A trait that allows for encoding a structure into a byte sequence.
pub trait Encode {
    /// Encodes a structure into a byte sequence, writing multi-byte fields in
    /// the given byte order.
    fn encode(&self, order: ByteOrder) -> Result<Vec<u8>, EncodeError>;
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, order: ByteOrder) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(order)
    }
}

/// Checks that `len` fits in a length prefix whose maximum is `max`.
pub(crate) fn check_len(len: usize, max: usize) -> Result<(), EncodeError> {
    if len > max {
        return Err(EncodeError::LengthOverflow { len, max });
    }
    Ok(())
}
