//! Bitcoin CompactSize varints.

use crate::VarintError;

const U16_TAG: u8 = 0xfd;
const U32_TAG: u8 = 0xfe;
const U64_TAG: u8 = 0xff;

/// Appends the CompactSize encoding of `n` to `buf`.
pub fn write_varint(buf: &mut Vec<u8>, n: u64) {
    if n < u64::from(U16_TAG) {
        buf.push(n as u8);
    } else if n <= u64::from(u16::MAX) {
        buf.push(U16_TAG);
        buf.extend_from_slice(&(n as u16).to_le_bytes());
    } else if n <= u64::from(u32::MAX) {
        buf.push(U32_TAG);
        buf.extend_from_slice(&(n as u32).to_le_bytes());
    } else {
        buf.push(U64_TAG);
        buf.extend_from_slice(&n.to_le_bytes());
    }
}

pub fn encode_varint(n: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(varint_len(n));
    write_varint(&mut buf, n);
    buf
}

/// Encoded length of `n` in bytes.
pub fn varint_len(n: u64) -> usize {
    if n < u64::from(U16_TAG) {
        1
    } else if n <= u64::from(u16::MAX) {
        3
    } else if n <= u64::from(u32::MAX) {
        5
    } else {
        9
    }
}

/// Narrows a wide integer to the varint domain.
///
/// Counts reaching the codec may come from arithmetic wider than `u64`, so the conversion is
/// explicit and fails instead of truncating.
pub fn narrow_varint(n: i128) -> Result<u64, VarintError> {
    if n < 0 {
        return Err(VarintError::Negative(n));
    }
    u64::try_from(n).map_err(|_| VarintError::TooLarge(n))
}

/// [`narrow_varint`] followed by [`encode_varint`].
pub fn encode_varint_checked(n: i128) -> Result<Vec<u8>, VarintError> {
    narrow_varint(n).map(encode_varint)
}

/// Decodes a varint from the front of `buf`, returning the value and the number of bytes read.
///
/// Rejects encodings that use a wider form than needed, as bitcoin consensus does.
pub fn decode_varint(buf: &[u8]) -> Result<(u64, usize), VarintError> {
    let tag = *buf.first().ok_or(VarintError::Truncated {
        needed: 1,
        available: 0,
    })?;

    let width = match tag {
        U16_TAG => 2,
        U32_TAG => 4,
        U64_TAG => 8,
        small => return Ok((u64::from(small), 1)),
    };

    let body = buf.get(1..1 + width).ok_or(VarintError::Truncated {
        needed: 1 + width,
        available: buf.len(),
    })?;
    let mut raw = [0u8; 8];
    raw[..width].copy_from_slice(body);
    let value = u64::from_le_bytes(raw);

    if varint_len(value) != 1 + width {
        return Err(VarintError::NonCanonical(value));
    }

    Ok((value, 1 + width))
}
