use std::{
    fmt,
    ops::{Deref, DerefMut},
};

use log::trace;

use crate::{
    crc,
    decode::{take, Decode, DecodeError},
    encode::{check_len, Encode, EncodeError},
    hexfmt::byte_to_hex,
    order::ByteOrder,
};

/// A growable, ordered byte container.
///
/// Any byte value is legal. On the wire a buffer is its length as a `u32`
/// (in the configured byte order) followed by the raw bytes.
///
/// # Encoding
///
/// | Field   | Size | Description |
/// |---------|------|-------------|
/// | `len`   | 4    | Number of bytes that follow. |
/// | `bytes` | n    | Buffer contents. |
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ByteBuffer {
    #[cfg_attr(feature = "serde", serde(with = "serde_bytes"))]
    data: Vec<u8>,
}

impl ByteBuffer {
    /// Size of the length prefix written by [`Encode`].
    pub const LEN_PREFIX_SIZE: usize = 4;

    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates a buffer of `len` zero bytes.
    pub fn zeroed(len: usize) -> Self {
        Self { data: vec![0; len] }
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

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    pub fn append_byte(&mut self, byte: u8) {
        self.data.push(byte);
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Appends the low 8 bits of `value`.
    pub fn append_int_as_byte(&mut self, value: i64) {
        self.data.push((value & 0xFF) as u8);
    }

    /// Appends the raw UTF-8 bytes of `s`, without a length or terminator.
    pub fn append_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    pub fn crc8(&self) -> u8 {
        crc::crc8(&self.data)
    }

    pub fn crc16(&self) -> u16 {
        crc::crc16(&self.data)
    }

    pub fn crc32(&self) -> u32 {
        crc::crc32(&self.data)
    }

    /// Appends the CRC16 of the current contents, growing the buffer by two bytes.
    pub fn add_crc16(&mut self) {
        let crc = self.crc16();
        self.data.extend_from_slice(&crc.to_le_bytes());
    }

    /// Replaces the contents with `data`, taking ownership of the allocation.
    ///
    /// No bytes are copied. Use [`ByteBuffer::assign_by_copy`] to keep the
    /// caller's data independent.
    pub fn assign(&mut self, data: Vec<u8>) {
        self.data = data;
    }

    /// Replaces the contents with an independent copy of `data`.
    pub fn assign_by_copy(&mut self, data: &[u8]) {
        self.data.clear();
        self.data.extend_from_slice(data);
    }

    /// Renders the contents as hex according to `format`.
    pub fn format_hex(&self, format: &HexFormat<'_>) -> String {
        let per_byte = 2 + format.prefix.len() + format.suffix.len() + format.separator.len();
        let mut out = String::with_capacity(self.data.len() * per_byte + 8);

        if format.with_len {
            out.push_str(&format!("[{}]", self.data.len()));
        }

        for (i, byte) in self.data.iter().enumerate() {
            if i > 0 {
                out.push_str(format.separator);
            }
            out.push_str(format.prefix);
            out.push_str(&byte_to_hex(*byte));
            out.push_str(format.suffix);
        }

        out
    }

    /// Replaces the contents with a buffer decoded from `data`.
    ///
    /// Returns the number of bytes consumed. `self` is unchanged on error.
    pub fn decode_from(&mut self, data: &[u8], order: ByteOrder) -> Result<usize, DecodeError> {
        let mut cursor = data;
        let payload = Self::decode_payload(&mut cursor, order)?;
        self.assign_by_copy(payload);
        Ok(data.len() - cursor.len())
    }

    fn decode_payload<'a>(data: &mut &'a [u8], order: ByteOrder) -> Result<&'a [u8], DecodeError> {
        let mut cursor = *data;
        let len = u32::decode(&mut cursor, order).map_err(|e| DecodeError::new::<Self>(e.kind()))?;
        let payload = take::<Self>(&mut cursor, len as usize)?;
        *data = cursor;
        Ok(payload)
    }
}

/// How [`ByteBuffer::format_hex`] renders a buffer.
///
/// Each byte becomes `prefix`, two uppercase hex digits, then `suffix`; bytes
/// are joined by `separator`. With `with_len` the output starts with `[<len>]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexFormat<'a> {
    pub with_len: bool,
    pub separator: &'a str,
    pub prefix: &'a str,
    pub suffix: &'a str,
}

impl HexFormat<'static> {
    /// Bare hex digits with no length tag or separators, e.g. `001122`.
    pub const PLAIN: Self = Self {
        with_len: false,
        separator: "",
        prefix: "",
        suffix: "",
    };
}

impl<'a> HexFormat<'a> {
    pub const fn new(with_len: bool, separator: &'a str, prefix: &'a str, suffix: &'a str) -> Self {
        Self {
            with_len,
            separator,
            prefix,
            suffix,
        }
    }
}

impl Default for HexFormat<'_> {
    fn default() -> Self {
        Self {
            with_len: true,
            separator: " ",
            prefix: "",
            suffix: "",
        }
    }
}

impl fmt::Display for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_hex(&HexFormat::default()))
    }
}

impl Deref for ByteBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for ByteBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(data: &[u8]) -> Self {
        Self { data: data.to_vec() }
    }
}

impl<const N: usize> From<[u8; N]> for ByteBuffer {
    fn from(data: [u8; N]) -> Self {
        Self { data: data.to_vec() }
    }
}

impl From<ByteBuffer> for Vec<u8> {
    fn from(buffer: ByteBuffer) -> Self {
        buffer.data
    }
}

impl Extend<u8> for ByteBuffer {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}

impl FromIterator<u8> for ByteBuffer {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl Encode for ByteBuffer {
    fn encode(&self, order: ByteOrder) -> Result<Vec<u8>, EncodeError> {
        check_len(self.data.len(), u32::MAX as usize)?;

        let mut out = Vec::with_capacity(Self::LEN_PREFIX_SIZE + self.data.len());
        out.extend((self.data.len() as u32).encode(order)?);
        out.extend_from_slice(&self.data);

        trace!("encoded byte buffer: {:x?}", out);
        Ok(out)
    }
}

impl Decode for ByteBuffer {
    fn decode(data: &mut &[u8], order: ByteOrder) -> Result<Self, DecodeError> {
        Ok(Self::from(Self::decode_payload(data, order)?))
    }
}

#[cfg(test)]
mod tests {
    use super::{ByteBuffer, HexFormat};
    use crate::{
        decode::{Decode, DecodeErrorKind},
        encode::Encode,
        order::ByteOrder::{BigEndian, LittleEndian},
    };

    #[test]
    fn construct() {
        assert_eq!(ByteBuffer::new().len(), 0);
        assert_eq!(ByteBuffer::zeroed(10).as_slice(), &[0; 10]);
        assert_eq!(ByteBuffer::from(vec![0x01, 0x02]).len(), 2);
        assert_eq!(ByteBuffer::from([0x01u8].as_slice()).len(), 1);
    }

    #[test]
    fn format_hex() {
        let mut buf = ByteBuffer::new();
        assert_eq!(buf.format_hex(&HexFormat::PLAIN), "");
        assert_eq!(buf.format_hex(&HexFormat::new(false, ",", "0x", "")), "");
        assert_eq!(buf.format_hex(&HexFormat::new(true, ",", "0x", "XXX")), "[0]");

        buf.append_byte(0x00);
        assert_eq!(buf.format_hex(&HexFormat::PLAIN), "00");
        assert_eq!(buf.format_hex(&HexFormat::new(false, ",", "0x", "")), "0x00");
        assert_eq!(buf.format_hex(&HexFormat::new(true, ",", "0x", "")), "[1]0x00");
        assert_eq!(buf.format_hex(&HexFormat::new(true, ",", "", "H")), "[1]00H");
        assert_eq!(buf.format_hex(&HexFormat::new(true, ",", "<<", ">>")), "[1]<<00>>");

        buf.append_bytes(&[0x01, 0x02]);
        assert_eq!(buf.format_hex(&HexFormat::PLAIN), "000102");
        assert_eq!(buf.format_hex(&HexFormat::new(false, ",", "0x", "")), "0x00,0x01,0x02");
        assert_eq!(buf.format_hex(&HexFormat::new(true, ",", "0x", "")), "[3]0x00,0x01,0x02");
        assert_eq!(buf.format_hex(&HexFormat::new(true, ",", "", "H")), "[3]00H,01H,02H");
        assert_eq!(
            buf.format_hex(&HexFormat::new(true, "|", "<<", ">>")),
            "[3]<<00>>|<<01>>|<<02>>"
        );

        assert_eq!(ByteBuffer::from([0x00, 0x11, 0x22]).format_hex(&HexFormat::PLAIN), "001122");
    }

    #[test]
    fn display() {
        assert_eq!(ByteBuffer::new().to_string(), "[0]");
        assert_eq!(ByteBuffer::from([0x00]).to_string(), "[1]00");
        assert_eq!(ByteBuffer::from([0x00, 0x11, 0x22, 0xFF]).to_string(), "[4]00 11 22 FF");
    }

    #[test]
    fn append() {
        let mut buf = ByteBuffer::new();
        buf.append_int_as_byte(0);
        buf.append_int_as_byte(255);
        buf.append_int_as_byte(256);
        buf.append_int_as_byte(65538);
        buf.append_int_as_byte(-1);
        assert_eq!(buf.to_string(), "[5]00 FF 00 02 FF");

        let mut buf = ByteBuffer::new();
        buf.append_str("AAA");
        assert_eq!(buf.to_string(), "[3]41 41 41");
    }

    #[test]
    fn crc() {
        let mut buf = ByteBuffer::new();
        buf.add_crc16();
        assert_eq!(buf.to_string(), "[2]FF FF");

        let mut buf = ByteBuffer::from([0x10]);
        assert_eq!(buf.crc8(), 0x70);
        assert_eq!(buf.crc16(), 0x8CBE);
        assert_eq!(buf.crc32(), 0xCFB5FFE9);

        buf.add_crc16();
        assert_eq!(buf.to_string(), "[3]10 BE 8C");
        buf.add_crc16();
        assert_eq!(buf.to_string(), "[5]10 BE 8C 00 00");
    }

    #[test]
    fn clone_is_independent() {
        let buf = ByteBuffer::from([0x01, 0x02]);
        let mut copy = buf.clone();
        assert_eq!(copy, buf);

        copy[0] += 1;
        assert_ne!(copy[0], buf[0]);
    }

    #[test]
    fn assign() {
        let mut buf = ByteBuffer::from([0x01, 0x02]);
        let data = vec![0xFF];
        let ptr = data.as_ptr();

        buf.assign(data);
        assert_eq!(buf.as_slice(), &[0xFF]);
        // Same allocation, not a copy.
        assert_eq!(buf.as_ptr(), ptr);

        buf[0] = 0xAA;
        assert_eq!(buf.into_inner(), vec![0xAA]);
    }

    #[test]
    fn assign_by_copy() {
        let mut buf = ByteBuffer::from([0x01, 0x02]);
        let data = [0xFF];

        buf.assign_by_copy(&data);
        assert_eq!(buf.len(), 1);
        assert_eq!(buf[0], 0xFF);

        buf[0] = 0xAA;
        assert_eq!(data[0], 0xFF);
    }

    #[test]
    fn encode() {
        let buf = ByteBuffer::from([0x01, 0x02]);
        assert_eq!(buf.encode(LittleEndian).unwrap(), [0x02, 0x00, 0x00, 0x00, 0x01, 0x02]);
        assert_eq!(buf.encode(BigEndian).unwrap(), [0x00, 0x00, 0x00, 0x02, 0x01, 0x02]);
        assert_eq!(ByteBuffer::new().encode(LittleEndian).unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn decode() {
        let encoded = [0x02, 0x00, 0x00, 0x00, 0x01, 0x02, 0xEE];
        let mut data = encoded.as_slice();

        let buf = ByteBuffer::decode(&mut data, LittleEndian).unwrap();
        assert_eq!(buf.as_slice(), &[0x01, 0x02]);
        assert_eq!(data, &[0xEE]);

        let mut buf = ByteBuffer::from([0x09]);
        assert_eq!(buf.decode_from(&encoded, LittleEndian).unwrap(), 6);
        assert_eq!(buf.as_slice(), &[0x01, 0x02]);
    }

    #[test]
    fn decode_short() {
        let mut buf = ByteBuffer::from([0x09]);

        let inputs: [&[u8]; 4] = [&[], &[0x00], &[0x00, 0x00, 0x00], &[0x01, 0x00, 0x00, 0x00]];
        for input in inputs {
            let err = buf.decode_from(input, LittleEndian).unwrap_err();
            assert!(matches!(err.kind(), DecodeErrorKind::InsufficientData { .. }));
        }

        let err = buf.decode_from(&[0x01, 0x00, 0x00, 0x00], LittleEndian).unwrap_err();
        assert_eq!(
            err.kind(),
            DecodeErrorKind::InsufficientData {
                required: 1,
                available: 0
            }
        );

        // Failed decodes leave the buffer alone.
        assert_eq!(buf.as_slice(), &[0x09]);
    }
}
