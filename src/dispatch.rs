//! One-shot codec selection.
//!
//! The encode and decode slots are bound exactly once, on first use, from
//! the detected CPU capability and then reused for every call. `OnceLock`
//! gives concurrent first callers an ordered initialization; there is no
//! re-probing or runtime toggling after that.

use std::sync::OnceLock;

use crate::error::DecodeError;
use crate::scalar;

#[cfg(feature = "simd")]
use crate::simd;

pub(crate) type EncodeFn = fn(&mut [u8], &[u8]);
pub(crate) type DecodeFn = fn(&mut [u8], &[u8]) -> Result<(), DecodeError>;

pub(crate) struct Codec {
    pub(crate) encode: EncodeFn,
    pub(crate) decode: DecodeFn,
}

static CODEC: OnceLock<Codec> = OnceLock::new();

pub(crate) fn codec() -> &'static Codec {
    CODEC.get_or_init(select)
}

#[cfg(feature = "simd")]
fn select() -> Codec {
    if simd::available() {
        Codec {
            encode: encode_blocks,
            decode: decode_blocks,
        }
    } else {
        Codec {
            encode: scalar::encode,
            decode: scalar::decode,
        }
    }
}

#[cfg(not(feature = "simd"))]
fn select() -> Codec {
    Codec {
        encode: scalar::encode,
        decode: scalar::decode,
    }
}

/// Vector path over the aligned prefix, scalar over the remainder.
#[cfg(feature = "simd")]
fn encode_blocks(dst: &mut [u8], src: &[u8]) {
    if src.is_empty() {
        return;
    }
    let done = simd::encode_aligned(dst, src);
    if done < src.len() {
        scalar::encode(&mut dst[done * 2..], &src[done..]);
    }
}

#[cfg(feature = "simd")]
fn decode_blocks(dst: &mut [u8], src: &[u8]) -> Result<(), DecodeError> {
    if src.is_empty() {
        return Ok(());
    }
    // `done` stops before the first block containing an invalid character
    // (without storing it), so the scalar pass over the suffix reproduces
    // the exact error and the exact partial write.
    let done = simd::decode_aligned(dst, src);
    if done < src.len() {
        return scalar::decode(&mut dst[done / 2..], &src[done..]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_binds_once() {
        let a = codec() as *const Codec;
        let b = codec() as *const Codec;
        assert_eq!(a, b);
    }

    #[test]
    fn test_bound_codec_matches_scalar() {
        let data: Vec<u8> = (0..=255u8).collect();
        let mut fast = vec![0u8; data.len() * 2];
        let mut reference = vec![0u8; data.len() * 2];

        (codec().encode)(&mut fast, &data);
        scalar::encode(&mut reference, &data);
        assert_eq!(fast, reference);

        let mut decoded = vec![0u8; data.len()];
        (codec().decode)(&mut decoded, &fast).unwrap();
        assert_eq!(decoded, data);
    }
}
