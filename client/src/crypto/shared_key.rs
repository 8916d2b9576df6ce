//! # Shared Key Derivation
//!
//! Diffie-Hellman over the Ed25519 curve, producing a symmetric key that two
//! parties can each compute from their own private key and the other's
//! public key.
//!
//! ## The derivation, step by step
//!
//! 1. Hash the 32-byte private key with SHA-512 and keep the first half.
//!    Ed25519 private keys are seeds, not scalars; this is the standard
//!    expansion that turns one into the other.
//! 2. Clamp the scalar (clear bits 0-2, clear bit 255, set bit 254). The
//!    clamped multiply keeps the result on the prime-order component.
//! 3. Unpack the remote public key into an Edwards point. This can fail:
//!    not every 32-byte string is a point on the curve, and a remote party
//!    can hand us anything.
//! 4. Multiply the point by the scalar and compress. Both sides arrive at
//!    the same point, which is the whole trick.
//! 5. Run the compressed point through HKDF-SHA256 to turn curve output
//!    into a uniformly-distributed AES key.
//!
//! The raw Diffie-Hellman output is never used as a key directly; HKDF
//! stands between the curve and the cipher.

use curve25519_dalek::edwards::CompressedEdwardsY;
use hkdf::Hkdf;
use sha2::Sha256;
use thiserror::Error;

use crate::config::{AES_KEY_LENGTH, KEY_LENGTH, SHARED_KEY_INFO};
use crate::crypto::hash::sha512;

/// Errors from shared key derivation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SharedKeyError {
    /// The remote public key bytes do not decompress to a curve point.
    #[error("remote public key is not a valid curve point")]
    InvalidPoint,
}

/// Compute the raw Diffie-Hellman shared secret between a private key and a
/// remote public key.
///
/// This is curve output, not key material. Unless you have a specific reason
/// to want the unprocessed point, use [`derive_shared_key`] instead.
pub fn derive_shared_secret(
    private_key: &[u8; KEY_LENGTH],
    remote_public_key: &[u8; KEY_LENGTH],
) -> Result<[u8; KEY_LENGTH], SharedKeyError> {
    // Expand the seed into a scalar the way Ed25519 signing does.
    let digest = sha512(private_key);
    let mut scalar = [0u8; KEY_LENGTH];
    scalar.copy_from_slice(&digest[..KEY_LENGTH]);

    let point = CompressedEdwardsY(*remote_public_key)
        .decompress()
        .ok_or(SharedKeyError::InvalidPoint)?;

    // mul_clamped applies the standard Ed25519 clamping to the scalar
    // before the multiply, matching the reference derivation exactly.
    let shared_point = point.mul_clamped(scalar);
    Ok(shared_point.compress().to_bytes())
}

/// Derive a 32-byte symmetric key shared between two parties.
///
/// Symmetric in the Diffie-Hellman sense: `derive(a_priv, b_pub)` and
/// `derive(b_priv, a_pub)` produce the same key and neither side ever
/// transmits anything secret.
pub fn derive_shared_key(
    private_key: &[u8; KEY_LENGTH],
    remote_public_key: &[u8; KEY_LENGTH],
) -> Result<[u8; AES_KEY_LENGTH], SharedKeyError> {
    let secret = derive_shared_secret(private_key, remote_public_key)?;

    // HKDF-SHA256 with an all-zero salt and a fixed info string. The salt is
    // part of the wire-compatible derivation and must not change.
    let salt = [0u8; AES_KEY_LENGTH];
    let hk = Hkdf::<Sha256>::new(Some(&salt), &secret);
    let mut key = [0u8; AES_KEY_LENGTH];
    hk.expand(SHARED_KEY_INFO, &mut key)
        .expect("32 bytes is a valid HKDF-SHA256 output length");
    Ok(key)
}
