//! Hex encoding and decoding with precise error reporting.
//!
//! Thin wrappers over the `hex` crate that (a) report *which* character was
//! bad, because "invalid hex" with no position is useless to a user who just
//! pasted a 64-character key, and (b) standardize on uppercase output --
//! the export format for keys, addresses, and signed payloads.

use thiserror::Error;

/// Errors from hex decoding. Carries enough context to point at the
/// offending input without echoing the whole string back (which might be
/// a private key).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HexError {
    #[error("invalid hex character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("hex string has odd length ({0})")]
    OddLength(usize),

    #[error("expected {expected} bytes of hex, got {got}")]
    LengthMismatch { expected: usize, got: usize },
}

/// Decode a hex string into bytes.
///
/// Accepts both cases on input; rejects anything that isn't `[0-9a-fA-F]`
/// with the character and its position.
pub fn decode(input: &str) -> Result<Vec<u8>, HexError> {
    hex::decode(input).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, index } => HexError::InvalidCharacter {
            character: c,
            position: index,
        },
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            HexError::OddLength(input.len())
        }
    })
}

/// Decode a hex string into a fixed-size array, or fail with the actual
/// byte count. Used for keys, hashes, and anything else with a wire-fixed
/// length.
pub fn decode_fixed<const N: usize>(input: &str) -> Result<[u8; N], HexError> {
    let bytes = decode(input)?;
    let got = bytes.len();
    bytes.try_into().map_err(|_| HexError::LengthMismatch {
        expected: N,
        got,
    })
}

/// Encode bytes as uppercase hex. This is the one true export format;
/// lowercase hex in a Vela payload is a bug somewhere upstream.
pub fn encode_upper(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Returns `true` if the input is a plausible hex string: even length,
/// every character a hex digit. Does not allocate.
pub fn is_hex(input: &str) -> bool {
    input.len() % 2 == 0 && input.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_roundtrip() {
        let bytes = decode("00FFa5").unwrap();
        assert_eq!(bytes, vec![0x00, 0xFF, 0xA5]);
        assert_eq!(encode_upper(&bytes), "00FFA5");
    }

    #[test]
    fn decode_reports_bad_character_position() {
        let err = decode("00GG").unwrap_err();
        assert_eq!(
            err,
            HexError::InvalidCharacter {
                character: 'G',
                position: 2
            }
        );
    }

    #[test]
    fn decode_rejects_odd_length() {
        assert_eq!(decode("ABC").unwrap_err(), HexError::OddLength(3));
    }

    #[test]
    fn decode_fixed_rejects_wrong_length() {
        let err = decode_fixed::<32>("ABCD").unwrap_err();
        assert_eq!(
            err,
            HexError::LengthMismatch {
                expected: 32,
                got: 2
            }
        );
    }

    #[test]
    fn decode_fixed_accepts_exact_length() {
        let arr = decode_fixed::<4>("DEADBEEF").unwrap();
        assert_eq!(arr, [0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn encode_is_uppercase() {
        assert_eq!(encode_upper(&[0xab, 0xcd]), "ABCD");
    }

    #[test]
    fn is_hex_checks() {
        assert!(is_hex("DEADBEEF"));
        assert!(is_hex("deadbeef"));
        assert!(is_hex(""));
        assert!(!is_hex("ABC")); // odd length
        assert!(!is_hex("XY"));
        assert!(!is_hex("A B C D"));
    }
}
