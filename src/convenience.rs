//! Allocating wrappers around the buffer-oriented entry points.

use crate::error::DecodeError;
use crate::{decode, decoded_len, encode, encoded_len};

/// Encodes `src` into a freshly allocated lowercase hex string.
///
/// ```
/// assert_eq!(hex_d::encode_string(b"g"), "67");
/// ```
pub fn encode_string(src: &[u8]) -> String {
    let mut out = vec![0u8; encoded_len(src.len())];
    encode(&mut out, src);
    debug_assert!(out.is_ascii());
    // SAFETY: the encoder only emits characters from the hex table,
    // which are all ASCII.
    unsafe { String::from_utf8_unchecked(out) }
}

/// Decodes `src` into a freshly allocated byte vector.
///
/// Unlike [`decode`], nothing of a partial decode is observable on error.
///
/// ```
/// assert_eq!(hex_d::decode_vec(b"e3a1").unwrap(), vec![0xe3, 0xa1]);
/// ```
pub fn decode_vec(src: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut out = vec![0u8; decoded_len(src.len())];
    decode(&mut out, src)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_string() {
        assert_eq!(encode_string(&[]), "");
        assert_eq!(encode_string(&[0xff]), "ff");
        assert_eq!(encode_string(b"Hello"), "48656c6c6f");
    }

    #[test]
    fn test_decode_vec() {
        assert_eq!(decode_vec(b"").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_vec(b"48656c6c6f").unwrap(), b"Hello");
        assert_eq!(decode_vec(b"4"), Err(DecodeError::OddLength));
        assert_eq!(decode_vec(b"4g"), Err(DecodeError::InvalidByte(b'g')));
    }
}
