//! AVX2 and SSSE3 hex implementations.
//!
//! Encode: split each byte into nibbles, map both through the 16-entry hex
//! table with `pshufb` (branch-free alphabetic-vs-numeric handling), then
//! interleave high/low characters. Decode: de-interleave even/odd
//! characters, classify each lane as digit or letter via range compares,
//! subtract the matching base, and recombine nibbles; the class masks double
//! as the validity mask.
//!
//! Based on techniques from:
//! - https://github.com/zbjornson/fast-hex
//! - https://lemire.me/blog/2023/07/27/decoding-base16-sequences-quickly/
//!
//! All functions consume whole blocks only and return source bytes consumed;
//! the decode routines stop (without storing) before the first block that
//! contains an invalid character.

use std::arch::x86_64::*;

/// AVX2 encoding: 32 source bytes -> 64 hex chars per iteration.
///
/// A 16..31 byte tail still fits an SSSE3 block, so the SSSE3 routine
/// finishes whatever the 256-bit loop leaves behind.
#[target_feature(enable = "avx2")]
pub(super) unsafe fn encode_avx2(dst: &mut [u8], src: &[u8]) -> usize {
    unsafe {
        const BLOCK: usize = 32;
        let blocks = src.len() / BLOCK;
        let done = blocks * BLOCK;

        let lut = _mm256_broadcastsi128_si256(hex_lut());
        let mask_0f = _mm256_set1_epi8(0x0F);

        for i in 0..blocks {
            let offset = i * BLOCK;
            let input = _mm256_loadu_si256(src.as_ptr().add(offset) as *const __m256i);

            let hi_nibbles = _mm256_and_si256(_mm256_srli_epi32::<4>(input), mask_0f);
            let lo_nibbles = _mm256_and_si256(input, mask_0f);

            // vpshufb operates per 128-bit lane, which is fine: the nibble
            // indices select within the duplicated 16-entry table.
            let hi_ascii = _mm256_shuffle_epi8(lut, hi_nibbles);
            let lo_ascii = _mm256_shuffle_epi8(lut, lo_nibbles);

            // unpack interleaves within lanes; the permutes restore the
            // cross-lane output order.
            let unpack_lo = _mm256_unpacklo_epi8(hi_ascii, lo_ascii);
            let unpack_hi = _mm256_unpackhi_epi8(hi_ascii, lo_ascii);
            let out_lo = _mm256_permute2x128_si256::<0x20>(unpack_lo, unpack_hi);
            let out_hi = _mm256_permute2x128_si256::<0x31>(unpack_lo, unpack_hi);

            _mm256_storeu_si256(dst.as_mut_ptr().add(offset * 2) as *mut __m256i, out_lo);
            _mm256_storeu_si256(
                dst.as_mut_ptr().add(offset * 2 + 32) as *mut __m256i,
                out_hi,
            );
        }

        done + encode_ssse3(&mut dst[done * 2..], &src[done..])
    }
}

/// SSSE3 encoding: 16 source bytes -> 32 hex chars per iteration.
#[target_feature(enable = "ssse3")]
pub(super) unsafe fn encode_ssse3(dst: &mut [u8], src: &[u8]) -> usize {
    unsafe {
        const BLOCK: usize = 16;
        let blocks = src.len() / BLOCK;

        let lut = hex_lut();
        let mask_0f = _mm_set1_epi8(0x0F);

        for i in 0..blocks {
            let offset = i * BLOCK;
            let input = _mm_loadu_si128(src.as_ptr().add(offset) as *const __m128i);

            let hi_nibbles = _mm_and_si128(_mm_srli_epi32::<4>(input), mask_0f);
            let lo_nibbles = _mm_and_si128(input, mask_0f);

            let hi_ascii = _mm_shuffle_epi8(lut, hi_nibbles);
            let lo_ascii = _mm_shuffle_epi8(lut, lo_nibbles);

            let out_lo = _mm_unpacklo_epi8(hi_ascii, lo_ascii);
            let out_hi = _mm_unpackhi_epi8(hi_ascii, lo_ascii);

            _mm_storeu_si128(dst.as_mut_ptr().add(offset * 2) as *mut __m128i, out_lo);
            _mm_storeu_si128(dst.as_mut_ptr().add(offset * 2 + 16) as *mut __m128i, out_hi);
        }

        blocks * BLOCK
    }
}

/// AVX2 decoding: 64 hex chars -> 32 bytes per iteration.
#[target_feature(enable = "avx2")]
pub(super) unsafe fn decode_avx2(dst: &mut [u8], src: &[u8]) -> usize {
    unsafe {
        const BLOCK: usize = 64;
        let blocks = src.len() / BLOCK;
        let mask_even = _mm256_set1_epi16(0x00FF);

        for i in 0..blocks {
            let offset = i * BLOCK;
            let input_lo = _mm256_loadu_si256(src.as_ptr().add(offset) as *const __m256i);
            let input_hi = _mm256_loadu_si256(src.as_ptr().add(offset + 32) as *const __m256i);

            // Even positions hold high-nibble chars, odd positions low-nibble.
            // packus collapses the widened lanes; permute4x64 fixes the
            // lane-crossed qword order it produces.
            let hi_chars = _mm256_permute4x64_epi64::<0xD8>(_mm256_packus_epi16(
                _mm256_and_si256(input_lo, mask_even),
                _mm256_and_si256(input_hi, mask_even),
            ));
            let lo_chars = _mm256_permute4x64_epi64::<0xD8>(_mm256_packus_epi16(
                _mm256_srli_epi16::<8>(input_lo),
                _mm256_srli_epi16::<8>(input_hi),
            ));

            let hi_vals = nibble_values_avx2(hi_chars);
            let lo_vals = nibble_values_avx2(lo_chars);

            // Invalid lanes decode to -1; the sign bit survives the OR, so a
            // single movemask covers both streams. The poisoned block is not
            // stored.
            if _mm256_movemask_epi8(_mm256_or_si256(hi_vals, lo_vals)) != 0 {
                return offset;
            }

            let packed = _mm256_or_si256(_mm256_slli_epi16::<4>(hi_vals), lo_vals);
            _mm256_storeu_si256(dst.as_mut_ptr().add(offset / 2) as *mut __m256i, packed);
        }

        let done = blocks * BLOCK;
        done + decode_ssse3(&mut dst[done / 2..], &src[done..])
    }
}

/// SSSE3 decoding: 32 hex chars -> 16 bytes per iteration.
#[target_feature(enable = "ssse3")]
pub(super) unsafe fn decode_ssse3(dst: &mut [u8], src: &[u8]) -> usize {
    unsafe {
        const BLOCK: usize = 32;
        let blocks = src.len() / BLOCK;
        let mask_even = _mm_set1_epi16(0x00FF);

        for i in 0..blocks {
            let offset = i * BLOCK;
            let input_lo = _mm_loadu_si128(src.as_ptr().add(offset) as *const __m128i);
            let input_hi = _mm_loadu_si128(src.as_ptr().add(offset + 16) as *const __m128i);

            let hi_chars = _mm_packus_epi16(
                _mm_and_si128(input_lo, mask_even),
                _mm_and_si128(input_hi, mask_even),
            );
            let lo_chars =
                _mm_packus_epi16(_mm_srli_epi16::<8>(input_lo), _mm_srli_epi16::<8>(input_hi));

            let hi_vals = nibble_values_sse(hi_chars);
            let lo_vals = nibble_values_sse(lo_chars);

            if _mm_movemask_epi8(_mm_or_si128(hi_vals, lo_vals)) != 0 {
                return offset;
            }

            let packed = _mm_or_si128(_mm_slli_epi16::<4>(hi_vals), lo_vals);
            _mm_storeu_si128(dst.as_mut_ptr().add(offset / 2) as *mut __m128i, packed);
        }

        blocks * BLOCK
    }
}

/// Maps hex characters to nibble values lane-wise; invalid lanes become -1.
///
/// '0'-'9' -> 0-9, 'A'-'F' and 'a'-'f' -> 10-15, selected through range
/// compare masks instead of branches.
#[target_feature(enable = "avx2")]
unsafe fn nibble_values_avx2(chars: __m256i) -> __m256i {
    let is_digit = _mm256_and_si256(
        _mm256_cmpgt_epi8(chars, _mm256_set1_epi8(0x2F)), // > '/'
        _mm256_cmpgt_epi8(_mm256_set1_epi8(0x3A), chars), // < ':'
    );
    let is_upper = _mm256_and_si256(
        _mm256_cmpgt_epi8(chars, _mm256_set1_epi8(0x40)), // > '@'
        _mm256_cmpgt_epi8(_mm256_set1_epi8(0x47), chars), // < 'G'
    );
    let is_lower = _mm256_and_si256(
        _mm256_cmpgt_epi8(chars, _mm256_set1_epi8(0x60)), // > '`'
        _mm256_cmpgt_epi8(_mm256_set1_epi8(0x67), chars), // < 'g'
    );

    let digit_vals = _mm256_and_si256(is_digit, _mm256_sub_epi8(chars, _mm256_set1_epi8(0x30)));
    let upper_vals = _mm256_and_si256(is_upper, _mm256_sub_epi8(chars, _mm256_set1_epi8(0x37)));
    let lower_vals = _mm256_and_si256(is_lower, _mm256_sub_epi8(chars, _mm256_set1_epi8(0x57)));

    let vals = _mm256_or_si256(_mm256_or_si256(digit_vals, upper_vals), lower_vals);
    let is_valid = _mm256_or_si256(_mm256_or_si256(is_digit, is_upper), is_lower);

    _mm256_or_si256(
        _mm256_and_si256(is_valid, vals),
        _mm256_andnot_si256(is_valid, _mm256_set1_epi8(-1)),
    )
}

/// 128-bit variant of [`nibble_values_avx2`].
#[target_feature(enable = "ssse3")]
unsafe fn nibble_values_sse(chars: __m128i) -> __m128i {
    let is_digit = _mm_and_si128(
        _mm_cmpgt_epi8(chars, _mm_set1_epi8(0x2F)), // > '/'
        _mm_cmplt_epi8(chars, _mm_set1_epi8(0x3A)), // < ':'
    );
    let is_upper = _mm_and_si128(
        _mm_cmpgt_epi8(chars, _mm_set1_epi8(0x40)), // > '@'
        _mm_cmplt_epi8(chars, _mm_set1_epi8(0x47)), // < 'G'
    );
    let is_lower = _mm_and_si128(
        _mm_cmpgt_epi8(chars, _mm_set1_epi8(0x60)), // > '`'
        _mm_cmplt_epi8(chars, _mm_set1_epi8(0x67)), // < 'g'
    );

    let digit_vals = _mm_and_si128(is_digit, _mm_sub_epi8(chars, _mm_set1_epi8(0x30)));
    let upper_vals = _mm_and_si128(is_upper, _mm_sub_epi8(chars, _mm_set1_epi8(0x37)));
    let lower_vals = _mm_and_si128(is_lower, _mm_sub_epi8(chars, _mm_set1_epi8(0x57)));

    let vals = _mm_or_si128(_mm_or_si128(digit_vals, upper_vals), lower_vals);
    let is_valid = _mm_or_si128(_mm_or_si128(is_digit, is_upper), is_lower);

    _mm_or_si128(
        _mm_and_si128(is_valid, vals),
        _mm_andnot_si128(is_valid, _mm_set1_epi8(-1)),
    )
}

/// The 16-entry lowercase hex table as a shuffle operand.
#[inline]
#[target_feature(enable = "sse2")]
fn hex_lut() -> __m128i {
    _mm_setr_epi8(
        b'0' as i8, b'1' as i8, b'2' as i8, b'3' as i8, b'4' as i8, b'5' as i8, b'6' as i8,
        b'7' as i8, b'8' as i8, b'9' as i8, b'a' as i8, b'b' as i8, b'c' as i8, b'd' as i8,
        b'e' as i8, b'f' as i8,
    )
}
