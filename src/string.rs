use crate::{
    decode::{take, Decode, DecodeError, DecodeErrorKind},
    encode::{check_len, Encode, EncodeError},
    order::ByteOrder,
};

/// Size of the length prefix in front of an encoded string.
pub const STRING_LEN_PREFIX_SIZE: usize = 2;

/// Strings are a `u16` byte length followed by the UTF-8 bytes. No terminator.
impl Encode for str {
    fn encode(&self, order: ByteOrder) -> Result<Vec<u8>, EncodeError> {
        let bytes = self.as_bytes();
        check_len(bytes.len(), u16::MAX as usize)?;

        let mut out = Vec::with_capacity(STRING_LEN_PREFIX_SIZE + bytes.len());
        out.extend((bytes.len() as u16).encode(order)?);
        out.extend_from_slice(bytes);
        Ok(out)
    }
}

impl Encode for String {
    fn encode(&self, order: ByteOrder) -> Result<Vec<u8>, EncodeError> {
        self.as_str().encode(order)
    }
}

impl Decode for String {
    fn decode(data: &mut &[u8], order: ByteOrder) -> Result<Self, DecodeError> {
        let mut cursor = *data;
        let len = u16::decode(&mut cursor, order).map_err(|e| DecodeError::new::<Self>(e.kind()))?;
        let bytes = take::<Self>(&mut cursor, len as usize)?;

        let s = std::str::from_utf8(bytes)
            .map_err(|e| DecodeError::new::<Self>(DecodeErrorKind::InvalidUtf8(e)))?
            .to_owned();

        *data = cursor;
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        decode::{Decode, DecodeErrorKind},
        encode::{Encode, EncodeError},
        order::ByteOrder::{BigEndian, LittleEndian},
    };

    #[test]
    fn encode() {
        assert_eq!("AAA".encode(LittleEndian).unwrap(), [0x03, 0x00, 0x41, 0x41, 0x41]);
        assert_eq!(
            "你好".encode(LittleEndian).unwrap(),
            [0x06, 0x00, 0xE4, 0xBD, 0xA0, 0xE5, 0xA5, 0xBD]
        );
        assert_eq!(String::from("A").encode(BigEndian).unwrap(), [0x00, 0x01, 0x41]);
        assert_eq!("".encode(LittleEndian).unwrap(), [0x00, 0x00]);
    }

    #[test]
    fn too_long() {
        let s = "x".repeat(u16::MAX as usize + 1);
        assert_eq!(
            s.encode(LittleEndian),
            Err(EncodeError::LengthOverflow {
                len: 65536,
                max: 65535
            })
        );
    }

    #[test]
    fn decode() {
        let mut data = [0x06, 0x00, 0xE4, 0xBD, 0xA0, 0xE5, 0xA5, 0xBD, 0x01].as_slice();
        assert_eq!(String::decode(&mut data, LittleEndian).unwrap(), "你好");
        assert_eq!(data, &[0x01]);
    }

    #[test]
    fn decode_short() {
        let inputs: [&[u8]; 3] = [&[], &[0x00], &[0x02, 0x00, 0x00]];
        for input in inputs {
            let mut data = input;
            let err = String::decode(&mut data, LittleEndian).unwrap_err();

            assert!(matches!(err.kind(), DecodeErrorKind::InsufficientData { .. }));
            assert_eq!(data, input);
        }
    }

    #[test]
    fn decode_invalid_utf8() {
        let err = String::decode(&mut [0x01, 0x00, 0xFF].as_slice(), LittleEndian).unwrap_err();
        assert!(matches!(err.kind(), DecodeErrorKind::InvalidUtf8(_)));
    }
}
