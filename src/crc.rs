use crc::Crc;

/// [CRC8 error-detecting algorithm](https://en.wikipedia.org/wiki/Cyclic_redundancy_check)
/// (CRC-8/SMBUS).
pub const CRC8: Crc<u8> = Crc::<u8>::new(&crc::CRC_8_SMBUS);

/// CRC16 used for envelope trailers (CRC-16/MODBUS).
///
/// Running the checksum over a message followed by its little-endian trailer
/// yields zero, which is what [`verify_crc16`] relies on.
pub const CRC16: Crc<u16> = Crc::<u16>::new(&crc::CRC_16_MODBUS);

/// CRC32 (CRC-32/ISO-HDLC, the zlib/PNG one).
pub const CRC32: Crc<u32> = Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);

pub fn crc8(data: &[u8]) -> u8 {
    CRC8.checksum(data)
}

pub fn crc16(data: &[u8]) -> u16 {
    CRC16.checksum(data)
}

pub fn crc32(data: &[u8]) -> u32 {
    CRC32.checksum(data)
}

/// Appends the CRC16 of `data` as a little-endian trailer.
pub fn append_crc16(mut data: Vec<u8>) -> Vec<u8> {
    let crc = crc16(&data);
    data.extend_from_slice(&crc.to_le_bytes());
    data
}

/// Returns `true` if the last two bytes of `data` are the little-endian CRC16
/// of everything before them.
pub fn verify_crc16(data: &[u8]) -> bool {
    match split_crc16(data) {
        Some((body, trailer)) => crc16(body) == trailer,
        None => false,
    }
}

/// Splits `data` into its body and the trailing little-endian CRC16.
pub(crate) fn split_crc16(data: &[u8]) -> Option<(&[u8], u16)> {
    let split = data.len().checked_sub(2)?;
    let (body, trailer) = data.split_at(split);
    Some((body, u16::from_le_bytes([trailer[0], trailer[1]])))
}
