//! # Protocol Constants
//!
//! Every magic number in the client lives here. A byte offset hardcoded
//! anywhere else is a bug waiting for a reviewer to miss it.
//!
//! Most of these values are fixed by the Vela wire formats. Changing them
//! breaks every address, message, and signed payload already out there, so
//! treat this file as consensus-critical even though it never touches the
//! network itself.

// ---------------------------------------------------------------------------
// Key & Signature Sizes
// ---------------------------------------------------------------------------

/// Ed25519 key length in bytes. Private seeds and public keys are both 32.
pub const KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Always 64 bytes. If yours isn't, something
/// has gone terribly wrong.
pub const SIGNATURE_LENGTH: usize = 64;

/// Keys are exported as uppercase hex, two characters per byte.
pub const KEY_HEX_LENGTH: usize = KEY_LENGTH * 2;

// ---------------------------------------------------------------------------
// Symmetric Encryption
// ---------------------------------------------------------------------------

/// AES-256-GCM key length in bytes.
pub const AES_KEY_LENGTH: usize = 32;

/// AES-256-GCM IV length in bytes. 96 bits is the standard GCM nonce size
/// and the only one you should use. 12 bytes. Not 16. Not 8. Twelve.
pub const AES_IV_LENGTH: usize = 12;

/// AES-256-GCM authentication tag length in bytes.
pub const AES_TAG_LENGTH: usize = 16;

/// Domain-separation label for HKDF when turning a shared curve point into
/// an AES key. Fixed by the message format at network launch; every deployed
/// wallet derives with this exact label, so it can never change.
pub const SHARED_KEY_INFO: &[u8] = b"catapult";

// ---------------------------------------------------------------------------
// Encrypted Message Wire Format
// ---------------------------------------------------------------------------

/// Leading byte that marks a payload as an AES-GCM encoded message.
/// Anything else means "not encoded -- hand the bytes back untouched."
pub const MESSAGE_MARKER: u8 = 0x01;

/// Fixed-size prefix of an encoded message: marker, tag, IV.
/// Anything shorter cannot be an encoded message, whatever its first byte says.
pub const MESSAGE_HEADER_LENGTH: usize = 1 + AES_TAG_LENGTH + AES_IV_LENGTH;

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Bytes of the public-key hash carried in a raw address.
pub const ADDRESS_HASH_LENGTH: usize = 20;

/// Bytes of checksum appended to a raw address.
pub const ADDRESS_CHECKSUM_LENGTH: usize = 3;

/// Raw address length: network byte + public-key hash + checksum.
pub const RAW_ADDRESS_LENGTH: usize = 1 + ADDRESS_HASH_LENGTH + ADDRESS_CHECKSUM_LENGTH;

/// Length of the base32 text form of an address. 24 raw bytes pad to 25
/// (five 5-byte blocks, 40 characters) and the single pad character is
/// dropped again, leaving 39.
pub const ENCODED_ADDRESS_LENGTH: usize = 39;

// ---------------------------------------------------------------------------
// Transaction Header Layout
// ---------------------------------------------------------------------------
//
// A serialized transaction starts with a fixed header:
//
//   size(4) | reserved(4) | signature(64) | signer public key(32) | reserved(4)
//
// The unsigned form carries zero-filled placeholders for the signature and
// signer slots; signing fills them in without touching anything else.

/// Offset of the signature inside a (signed or unsigned) transaction.
pub const TX_SIGNATURE_OFFSET: usize = 8;

/// Offset of the signer public key.
pub const TX_SIGNER_OFFSET: usize = TX_SIGNATURE_OFFSET + SIGNATURE_LENGTH;

/// Reserved padding between the signer public key and the body.
pub const TX_RESERVED_LENGTH: usize = 4;

/// Total header length. Everything after this offset is the transaction
/// body, which is what actually gets signed (together with the generation
/// hash).
pub const TX_HEADER_LENGTH: usize = TX_SIGNER_OFFSET + KEY_LENGTH + TX_RESERVED_LENGTH;

/// Network generation hash length. Prepended to the body when computing
/// signing bytes so a signature can never replay across networks.
pub const GENERATION_HASH_LENGTH: usize = 32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crypto_parameter_sizes() {
        assert_eq!(KEY_LENGTH, 32);
        assert_eq!(SIGNATURE_LENGTH, 64);
        assert_eq!(AES_KEY_LENGTH, 32);
        assert_eq!(AES_IV_LENGTH, 12);
        assert_eq!(AES_TAG_LENGTH, 16);
    }

    #[test]
    fn test_message_header_length() {
        // marker(1) + tag(16) + iv(12)
        assert_eq!(MESSAGE_HEADER_LENGTH, 29);
    }

    #[test]
    fn test_address_layout() {
        assert_eq!(RAW_ADDRESS_LENGTH, 24);
        assert_eq!(ENCODED_ADDRESS_LENGTH, 39);
    }

    #[test]
    fn test_transaction_header_layout() {
        // size(4) + reserved(4) + signature(64) + signer(32) + reserved(4).
        // If this assertion ever fails, every deployed signer disagrees with
        // us about where the body starts. Do not "fix" the test.
        assert_eq!(TX_SIGNATURE_OFFSET, 8);
        assert_eq!(TX_SIGNER_OFFSET, 72);
        assert_eq!(TX_HEADER_LENGTH, 108);
    }
}
