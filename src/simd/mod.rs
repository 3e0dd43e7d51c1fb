//! SIMD-accelerated hex paths.
//!
//! Runtime CPU feature detection selects the widest usable implementation.
//! Every routine here consumes whole blocks only and reports how many source
//! bytes it processed; the dispatcher always finishes the remainder with the
//! scalar codec. The decode routines additionally stop (without storing)
//! before the first block containing an invalid character, leaving precise
//! error reporting to the scalar re-scan of the suffix.

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "x86_64")]
mod x86_64;

#[cfg(target_arch = "x86_64")]
use std::sync::OnceLock;

#[cfg(target_arch = "x86_64")]
static HAS_AVX2: OnceLock<bool> = OnceLock::new();

#[cfg(target_arch = "x86_64")]
static HAS_SSSE3: OnceLock<bool> = OnceLock::new();

/// Check if AVX2 is available (cached after first call)
#[cfg(target_arch = "x86_64")]
pub(crate) fn has_avx2() -> bool {
    *HAS_AVX2.get_or_init(|| is_x86_feature_detected!("avx2"))
}

/// Check if SSSE3 is available (cached after first call)
#[cfg(target_arch = "x86_64")]
pub(crate) fn has_ssse3() -> bool {
    *HAS_SSSE3.get_or_init(|| is_x86_feature_detected!("ssse3"))
}

#[cfg(target_arch = "x86_64")]
pub(crate) fn available() -> bool {
    has_avx2() || has_ssse3()
}

/// NEON is mandatory on aarch64.
#[cfg(target_arch = "aarch64")]
pub(crate) fn available() -> bool {
    true
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) fn available() -> bool {
    false
}

/// Encodes the aligned prefix of `src`, returning source bytes consumed.
#[cfg(target_arch = "x86_64")]
pub(crate) fn encode_aligned(dst: &mut [u8], src: &[u8]) -> usize {
    debug_assert!(dst.len() >= src.len() * 2);
    // SAFETY: feature presence is verified by the cached probes; the block
    // loops stay within the bounds checked above.
    unsafe {
        if has_avx2() {
            x86_64::encode_avx2(dst, src)
        } else {
            x86_64::encode_ssse3(dst, src)
        }
    }
}

/// Decodes the aligned prefix of `src`, returning source chars consumed.
///
/// Stops before the first block containing an invalid character.
#[cfg(target_arch = "x86_64")]
pub(crate) fn decode_aligned(dst: &mut [u8], src: &[u8]) -> usize {
    debug_assert!(dst.len() >= src.len() / 2);
    // SAFETY: as in `encode_aligned`.
    unsafe {
        if has_avx2() {
            x86_64::decode_avx2(dst, src)
        } else {
            x86_64::decode_ssse3(dst, src)
        }
    }
}

#[cfg(target_arch = "aarch64")]
pub(crate) fn encode_aligned(dst: &mut [u8], src: &[u8]) -> usize {
    debug_assert!(dst.len() >= src.len() * 2);
    // SAFETY: NEON is mandatory on aarch64; the block loop stays within the
    // bounds checked above.
    unsafe { aarch64::encode_neon(dst, src) }
}

#[cfg(target_arch = "aarch64")]
pub(crate) fn decode_aligned(dst: &mut [u8], src: &[u8]) -> usize {
    debug_assert!(dst.len() >= src.len() / 2);
    // SAFETY: as in `encode_aligned`.
    unsafe { aarch64::decode_neon(dst, src) }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) fn encode_aligned(_dst: &mut [u8], _src: &[u8]) -> usize {
    0
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) fn decode_aligned(_dst: &mut [u8], _src: &[u8]) -> usize {
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar;

    // Lengths straddling every block boundary of interest: below one SSSE3
    // block, exactly one, one plus a partial, AVX2-sized, and beyond.
    const LENGTHS: &[usize] = &[0, 1, 7, 15, 16, 17, 24, 31, 32, 33, 48, 63, 64, 65, 96, 255, 256, 257];

    #[test]
    fn test_encode_aligned_matches_scalar() {
        if !available() {
            return;
        }
        for &len in LENGTHS {
            let data: Vec<u8> = (0..len).map(|i| (i * 31 % 256) as u8).collect();
            let mut dst = vec![0u8; len * 2];
            let done = encode_aligned(&mut dst, &data);
            assert!(done <= len);
            assert_eq!(done % 16, 0, "len {len}: consumed {done} not block aligned");

            let mut expected = vec![0u8; len * 2];
            scalar::encode(&mut expected, &data);
            assert_eq!(dst[..done * 2], expected[..done * 2], "len {len}");
        }
    }

    #[test]
    fn test_encode_aligned_table_lookup_all_nibbles() {
        if !available() {
            return;
        }
        // Every byte value appears, so every entry of the shuffle table is
        // exercised; 96 bytes fills wide blocks exactly, 112 adds a narrow
        // tail block on the AVX2 cascade.
        for &len in &[96usize, 112] {
            let data: Vec<u8> = (0..=255u8).cycle().take(len).collect();
            let mut dst = vec![0u8; len * 2];
            let done = encode_aligned(&mut dst, &data);
            assert_eq!(done, len);

            let mut expected = vec![0u8; len * 2];
            scalar::encode(&mut expected, &data);
            assert_eq!(dst, expected, "len {len}");
        }
    }

    #[test]
    fn test_decode_aligned_matches_scalar() {
        if !available() {
            return;
        }
        for &len in LENGTHS {
            let data: Vec<u8> = (0..len).map(|i| (i * 31 % 256) as u8).collect();
            let mut encoded = vec![0u8; len * 2];
            scalar::encode(&mut encoded, &data);

            let mut dst = vec![0u8; len];
            let done = decode_aligned(&mut dst, &encoded);
            assert!(done <= encoded.len());
            assert_eq!(done % 32, 0, "len {len}: consumed {done} not block aligned");
            assert_eq!(dst[..done / 2], data[..done / 2], "len {len}");
        }
    }

    #[test]
    fn test_decode_aligned_uppercase() {
        if !available() {
            return;
        }
        let data: Vec<u8> = (0..64).map(|i| (i * 5 % 256) as u8).collect();
        let mut encoded = vec![0u8; 128];
        scalar::encode(&mut encoded, &data);
        encoded.make_ascii_uppercase();

        let mut dst = vec![0u8; 64];
        let done = decode_aligned(&mut dst, &encoded);
        assert_eq!(dst[..done / 2], data[..done / 2]);
    }

    #[test]
    fn test_decode_aligned_stops_at_invalid_block() {
        if !available() {
            return;
        }
        // 128 valid chars, then an invalid byte inside the next block.
        let data: Vec<u8> = (0..80).map(|i| i as u8).collect();
        let mut encoded = vec![0u8; 160];
        scalar::encode(&mut encoded, &data);
        encoded[130] = b'z';

        let mut dst = vec![0u8; 80];
        let done = decode_aligned(&mut dst, &encoded);
        // Consumed never reaches past the poisoned block.
        assert!(done <= 128, "consumed {done}");
        assert_eq!(done % 32, 0);
        assert_eq!(dst[..done / 2], data[..done / 2]);
    }

    #[test]
    fn test_decode_aligned_invalid_first_block() {
        if !available() {
            return;
        }
        let mut encoded = vec![b'a'; 64];
        encoded[3] = 0xFF;

        let mut dst = vec![0u8; 32];
        assert_eq!(decode_aligned(&mut dst, &encoded), 0);
    }
}
