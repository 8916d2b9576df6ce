//! # Hashing Utilities
//!
//! The hash functions the wire formats pin down, and nothing else:
//!
//! - **SHA3-256** -- address derivation and address checksums. The chain
//!   family standardized on Keccak-derived hashing for everything
//!   identity-shaped, and we inherit that choice byte for byte.
//! - **SHA-512** -- the first half of its digest is the Ed25519-compatible
//!   scalar used for shared-secret derivation (same expansion the signing
//!   primitive applies to a seed).
//!
//! SHA-256 also appears in the crate, but only inside HKDF, which drives it
//! internally. There is no "pick your favorite hash" parameter anywhere:
//! every call site uses the one function the format demands, and these
//! wrappers exist so that choice is visible in one place.

use sha2::{Digest as Sha2Digest, Sha512};
use sha3::{Digest as Sha3Digest, Sha3_256};

/// SHA-512 digest as a fixed-size array. 64 bytes; shared-secret derivation
/// uses only the first half, but truncation is the caller's decision.
pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut output = [0u8; 64];
    output.copy_from_slice(&Sha512::digest(data));
    output
}

/// SHA3-256 digest as a fixed-size array.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut output = [0u8; 32];
    output.copy_from_slice(&Sha3_256::digest(data));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha512_empty_vector() {
        assert_eq!(
            hex::encode(sha512(b"")),
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
             47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        );
    }

    #[test]
    fn sha3_256_empty_vector() {
        // SHA3-256, not Keccak-256. The 0x06 domain padding matters; mixing
        // the two is a classic cross-chain porting bug.
        assert_eq!(
            hex::encode(sha3_256(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn hashes_are_deterministic_and_distinct() {
        let data = b"vela";
        assert_eq!(sha3_256(data), sha3_256(data));
        assert_ne!(&sha512(data)[..32], &sha3_256(data)[..]);
    }
}
