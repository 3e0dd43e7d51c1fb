//! NEON hex implementations.
//!
//! Same structure as the x86_64 paths, with the cleaner aarch64 idioms:
//! `vqtbl1q_u8` for the nibble table lookup, `vzip1q/vzip2q` for the encode
//! interleave and `vuzp1q/vuzp2q` for the decode de-interleave.

use std::arch::aarch64::*;

use crate::scalar::HEX_TABLE;

/// NEON encoding: 16 source bytes -> 32 hex chars per iteration.
#[target_feature(enable = "neon")]
pub(super) unsafe fn encode_neon(dst: &mut [u8], src: &[u8]) -> usize {
    unsafe {
        const BLOCK: usize = 16;
        let blocks = src.len() / BLOCK;

        let lut = vld1q_u8(HEX_TABLE.as_ptr());
        let mask_0f = vdupq_n_u8(0x0F);

        for i in 0..blocks {
            let offset = i * BLOCK;
            let input = vld1q_u8(src.as_ptr().add(offset));

            // Logical shift fills with zeroes, so the high nibbles need no mask.
            let hi_nibbles = vshrq_n_u8::<4>(input);
            let lo_nibbles = vandq_u8(input, mask_0f);

            let hi_ascii = vqtbl1q_u8(lut, hi_nibbles);
            let lo_ascii = vqtbl1q_u8(lut, lo_nibbles);

            let out_lo = vzip1q_u8(hi_ascii, lo_ascii);
            let out_hi = vzip2q_u8(hi_ascii, lo_ascii);

            vst1q_u8(dst.as_mut_ptr().add(offset * 2), out_lo);
            vst1q_u8(dst.as_mut_ptr().add(offset * 2 + 16), out_hi);
        }

        blocks * BLOCK
    }
}

/// NEON decoding: 32 hex chars -> 16 bytes per iteration.
///
/// Stops (without storing) before the first block containing an invalid
/// character; the caller re-decodes the suffix through the scalar codec.
#[target_feature(enable = "neon")]
pub(super) unsafe fn decode_neon(dst: &mut [u8], src: &[u8]) -> usize {
    unsafe {
        const BLOCK: usize = 32;
        let blocks = src.len() / BLOCK;

        for i in 0..blocks {
            let offset = i * BLOCK;
            let input_lo = vld1q_u8(src.as_ptr().add(offset));
            let input_hi = vld1q_u8(src.as_ptr().add(offset + 16));

            // Even positions hold high-nibble chars, odd positions low-nibble.
            let hi_chars = vuzp1q_u8(input_lo, input_hi);
            let lo_chars = vuzp2q_u8(input_lo, input_hi);

            let hi_vals = nibble_values_neon(hi_chars);
            let lo_vals = nibble_values_neon(lo_chars);

            // Invalid lanes decode to 255; valid values never exceed 15.
            let invalid = vorrq_u8(
                vceqq_u8(hi_vals, vdupq_n_u8(255)),
                vceqq_u8(lo_vals, vdupq_n_u8(255)),
            );
            if vmaxvq_u8(invalid) != 0 {
                return offset;
            }

            let packed = vorrq_u8(vshlq_n_u8::<4>(hi_vals), lo_vals);
            vst1q_u8(dst.as_mut_ptr().add(offset / 2), packed);
        }

        blocks * BLOCK
    }
}

/// Maps hex characters to nibble values lane-wise; invalid lanes become 255.
#[target_feature(enable = "neon")]
unsafe fn nibble_values_neon(chars: uint8x16_t) -> uint8x16_t {
    // '0'-'9' -> 0-9, 'A'-'F'/'a'-'f' -> 10-15, via range compare masks.
    let is_digit = vandq_u8(
        vcgeq_u8(chars, vdupq_n_u8(b'0')),
        vcleq_u8(chars, vdupq_n_u8(b'9')),
    );
    let is_upper = vandq_u8(
        vcgeq_u8(chars, vdupq_n_u8(b'A')),
        vcleq_u8(chars, vdupq_n_u8(b'F')),
    );
    let is_lower = vandq_u8(
        vcgeq_u8(chars, vdupq_n_u8(b'a')),
        vcleq_u8(chars, vdupq_n_u8(b'f')),
    );

    let digit_vals = vandq_u8(is_digit, vsubq_u8(chars, vdupq_n_u8(0x30)));
    let upper_vals = vandq_u8(is_upper, vsubq_u8(chars, vdupq_n_u8(0x37)));
    let lower_vals = vandq_u8(is_lower, vsubq_u8(chars, vdupq_n_u8(0x57)));

    let vals = vorrq_u8(vorrq_u8(digit_vals, upper_vals), lower_vals);
    let is_valid = vorrq_u8(vorrq_u8(is_digit, is_upper), is_lower);

    vorrq_u8(
        vandq_u8(is_valid, vals),
        vbicq_u8(vdupq_n_u8(255), is_valid),
    )
}
