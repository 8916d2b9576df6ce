//! Base32 encoding for addresses.
//!
//! RFC 4648 alphabet (`A-Z2-7`), no padding characters, operating strictly
//! on whole blocks: 5 input bytes become 8 output characters and vice versa.
//! Callers that need a non-multiple length (the 24-byte raw address) pad up
//! to a block boundary themselves and drop the surplus -- see
//! [`crate::identity::Address`].
//!
//! The shift-and-mask arithmetic below is the wire definition of the format.
//! It is written out block by block rather than as a generic bit-stream loop
//! so the mapping between raw bits and output characters can be checked
//! by eye against the reference tables.

use thiserror::Error;

/// Number of raw bytes per base32 block.
pub const DECODED_BLOCK_SIZE: usize = 5;

/// Number of output characters per base32 block.
pub const ENCODED_BLOCK_SIZE: usize = 8;

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Errors from base32 encoding or decoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Base32Error {
    /// The input contained a character outside `A-Z2-7`.
    #[error("illegal base32 character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    /// Raw input length was not a multiple of the 5-byte block size.
    #[error("base32 input length {got} is not a multiple of {DECODED_BLOCK_SIZE}")]
    InvalidDecodedLength { got: usize },

    /// Encoded input length was not a multiple of the 8-character block size.
    #[error("base32 text length {got} is not a multiple of {ENCODED_BLOCK_SIZE}")]
    InvalidEncodedLength { got: usize },
}

/// Map one character back to its 5-bit value: `A-Z` to 0-25, `2-7` to 26-31.
fn decode_char(c: u8) -> Option<u8> {
    match c {
        b'A'..=b'Z' => Some(c - b'A'),
        b'2'..=b'7' => Some(c - b'2' + 26),
        _ => None,
    }
}

/// Encode one 5-byte block into 8 characters.
fn encode_block(input: &[u8], output: &mut [u8]) {
    output[0] = ALPHABET[(input[0] >> 3) as usize];
    output[1] = ALPHABET[(((input[0] & 0x07) << 2) | (input[1] >> 6)) as usize];
    output[2] = ALPHABET[((input[1] & 0x3e) >> 1) as usize];
    output[3] = ALPHABET[(((input[1] & 0x01) << 4) | (input[2] >> 4)) as usize];
    output[4] = ALPHABET[(((input[2] & 0x0f) << 1) | (input[3] >> 7)) as usize];
    output[5] = ALPHABET[((input[3] & 0x7f) >> 2) as usize];
    output[6] = ALPHABET[(((input[3] & 0x03) << 3) | (input[4] >> 5)) as usize];
    output[7] = ALPHABET[(input[4] & 0x1f) as usize];
}

/// Decode one 8-character block into 5 bytes.
///
/// `position` is the offset of the block inside the overall input, used
/// only for error reporting.
fn decode_block(input: &[u8], position: usize, output: &mut [u8]) -> Result<(), Base32Error> {
    let mut vals = [0u8; ENCODED_BLOCK_SIZE];
    for (i, &c) in input.iter().enumerate().take(ENCODED_BLOCK_SIZE) {
        vals[i] = decode_char(c).ok_or(Base32Error::InvalidCharacter {
            character: c as char,
            position: position + i,
        })?;
    }

    output[0] = (vals[0] << 3) | (vals[1] >> 2);
    output[1] = ((vals[1] & 0x03) << 6) | (vals[2] << 1) | (vals[3] >> 4);
    output[2] = ((vals[3] & 0x0f) << 4) | (vals[4] >> 1);
    output[3] = ((vals[4] & 0x01) << 7) | (vals[5] << 2) | (vals[6] >> 3);
    output[4] = ((vals[6] & 0x07) << 5) | vals[7];
    Ok(())
}

/// Encode raw bytes as base32 text. The length must be a multiple of 5.
pub fn encode(data: &[u8]) -> Result<String, Base32Error> {
    if data.len() % DECODED_BLOCK_SIZE != 0 {
        return Err(Base32Error::InvalidDecodedLength { got: data.len() });
    }

    let mut output = vec![0u8; data.len() / DECODED_BLOCK_SIZE * ENCODED_BLOCK_SIZE];
    for (i, block) in data.chunks_exact(DECODED_BLOCK_SIZE).enumerate() {
        encode_block(block, &mut output[i * ENCODED_BLOCK_SIZE..]);
    }

    // The alphabet is pure ASCII, so this cannot fail.
    Ok(String::from_utf8(output).expect("base32 alphabet is ASCII"))
}

/// Decode base32 text back into raw bytes. The length must be a multiple
/// of 8 and every character must come from the `A-Z2-7` alphabet.
pub fn decode(text: &str) -> Result<Vec<u8>, Base32Error> {
    // Bail out on any multi-byte character up front so byte positions below
    // are also character positions.
    if let Some((position, character)) = text.char_indices().find(|(_, c)| !c.is_ascii()) {
        return Err(Base32Error::InvalidCharacter {
            character,
            position,
        });
    }

    let bytes = text.as_bytes();
    if bytes.len() % ENCODED_BLOCK_SIZE != 0 {
        return Err(Base32Error::InvalidEncodedLength { got: bytes.len() });
    }

    let mut output = vec![0u8; bytes.len() / ENCODED_BLOCK_SIZE * DECODED_BLOCK_SIZE];
    for (i, block) in bytes.chunks_exact(ENCODED_BLOCK_SIZE).enumerate() {
        decode_block(
            block,
            i * ENCODED_BLOCK_SIZE,
            &mut output[i * DECODED_BLOCK_SIZE..],
        )?;
    }
    Ok(output)
}
