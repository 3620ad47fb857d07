//! Single-byte hex helpers.

use hex::FromHexError;

/// Formats a byte as two uppercase hex digits.
pub fn byte_to_hex(byte: u8) -> String {
    hex::encode_upper([byte])
}

/// Parses exactly two hex digits (either case) into a byte.
///
/// # Errors
///
/// - [`FromHexError::OddLength`] if the input has an odd number of digits.
/// - [`FromHexError::InvalidStringLength`] if it is not exactly two digits.
/// - [`FromHexError::InvalidHexCharacter`] on a non-hex character.
pub fn hex_to_byte(s: &str) -> Result<u8, FromHexError> {
    let mut out = [0u8; 1];
    hex::decode_to_slice(s, &mut out)?;
    Ok(out[0])
}
