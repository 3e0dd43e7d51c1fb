//! Byte-by-byte reference codec.
//!
//! Correct for any input length. Also finishes the remainder left over by
//! the SIMD block paths, and re-decodes a failing suffix so that errors are
//! reported with the same precision no matter which path ran first.

use crate::error::DecodeError;

/// Nibble-to-ASCII table; encode output is always lowercase.
pub(crate) const HEX_TABLE: &[u8; 16] = b"0123456789abcdef";

/// Encodes `src` two characters per byte into `dst`.
pub(crate) fn encode(dst: &mut [u8], src: &[u8]) {
    for (b, out) in src.iter().zip(dst.chunks_exact_mut(2)) {
        out[0] = HEX_TABLE[(b >> 4) as usize];
        out[1] = HEX_TABLE[(b & 0x0F) as usize];
    }
}

/// Decodes `src` pairwise into `dst`.
///
/// Bytes decoded before an error is detected remain written. An invalid
/// trailing unpaired character reports `InvalidByte`, not `OddLength`,
/// since the invalid character is the earlier problem.
pub(crate) fn decode(dst: &mut [u8], src: &[u8]) -> Result<(), DecodeError> {
    let mut i = 0;
    for pair in src.chunks_exact(2) {
        let hi = from_hex_char(pair[0]).ok_or(DecodeError::InvalidByte(pair[0]))?;
        let lo = from_hex_char(pair[1]).ok_or(DecodeError::InvalidByte(pair[1]))?;
        dst[i] = (hi << 4) | lo;
        i += 1;
    }
    if src.len() % 2 == 1 {
        let last = src[src.len() - 1];
        if from_hex_char(last).is_none() {
            return Err(DecodeError::InvalidByte(last));
        }
        return Err(DecodeError::OddLength);
    }
    Ok(())
}

/// Converts a single hex character to its nibble value.
pub(crate) fn from_hex_char(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
