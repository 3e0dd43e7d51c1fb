//! Fast hexadecimal encoding and decoding.
//!
//! A dual-path codec: a portable scalar implementation that is always
//! correct, plus vectorized fast paths (AVX2/SSSE3 on x86_64, NEON on
//! aarch64) selected once at first use via runtime CPU feature detection.
//! The vector paths process whole blocks only; any remainder is finished by
//! the scalar codec, so correctness for arbitrary lengths follows from the
//! block paths plus the scalar fallback.
//!
//! The core entry points write into caller-supplied buffers and never
//! allocate. Encode always produces lowercase hex; decode accepts both
//! cases. For owned output see [`encode_string`] and [`decode_vec`].
//!
//! ```
//! let mut buf = [0u8; 4];
//! hex_d::encode(&mut buf, &[0xe3, 0xa1]);
//! assert_eq!(&buf, b"e3a1");
//!
//! let mut out = [0u8; 2];
//! hex_d::decode(&mut out, b"E3A1").unwrap();
//! assert_eq!(out, [0xe3, 0xa1]);
//! ```

mod convenience;
mod dispatch;
mod error;
mod scalar;

#[cfg(feature = "simd")]
mod simd;

pub use convenience::{decode_vec, encode_string};
pub use error::DecodeError;

/// Number of hex characters produced by encoding `n` bytes.
pub const fn encoded_len(n: usize) -> usize {
    n * 2
}

/// Number of bytes produced by decoding `n` hex characters.
pub const fn decoded_len(n: usize) -> usize {
    n / 2
}

/// Encodes `src` into `2 * src.len()` lowercase hex characters in `dst`.
///
/// Empty `src` is a no-op. Encoding cannot fail.
///
/// # Panics
///
/// Panics if `dst` is shorter than `2 * src.len()`.
pub fn encode(dst: &mut [u8], src: &[u8]) {
    assert!(
        dst.len() >= encoded_len(src.len()),
        "hex encode: dst length {} < {}",
        dst.len(),
        encoded_len(src.len())
    );
    (dispatch::codec().encode)(dst, src)
}

/// Decodes `src` into `src.len() / 2` bytes in `dst`.
///
/// Accepts both lowercase and uppercase hex digits. On error, the bytes
/// decoded before the error was detected remain written in `dst`; the
/// earliest problem in the input is the one reported, and an invalid byte
/// takes priority over an odd-length complaint caused by a trailing
/// unpaired character. Empty `src` succeeds and writes nothing.
///
/// # Panics
///
/// Panics if `dst` is shorter than `src.len() / 2`.
pub fn decode(dst: &mut [u8], src: &[u8]) -> Result<(), DecodeError> {
    assert!(
        dst.len() >= decoded_len(src.len()),
        "hex decode: dst length {} < {}",
        dst.len(),
        decoded_len(src.len())
    );
    (dispatch::codec().decode)(dst, src)
}
