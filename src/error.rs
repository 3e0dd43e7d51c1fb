use std::fmt;

/// Errors that can occur during hex decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The input has an odd number of characters
    OddLength,
    /// The input contains a byte outside `[0-9a-fA-F]`; carries the byte value
    InvalidByte(u8),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::OddLength => write!(f, "odd length hex string"),
            DecodeError::InvalidByte(b) => {
                if b.is_ascii_graphic() {
                    write!(f, "invalid byte: {:#04x} ('{}')", b, *b as char)
                } else {
                    write!(f, "invalid byte: {:#04x}", b)
                }
            }
        }
    }
}

impl std::error::Error for DecodeError {}
