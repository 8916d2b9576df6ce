//! # Key Management
//!
//! Ed25519 keypairs for Vela accounts: creation, hex import/export, signing
//! and verification.
//!
//! ## Why Ed25519?
//!
//! - Deterministic signatures (no k-value footguns like ECDSA).
//! - 128-bit security level in 32+32 bytes. Compact and sufficient.
//! - Constant-time implementations exist and are well-audited.
//! - The same curve carries the Diffie-Hellman step for encrypted messages
//!   (see [`crate::crypto::shared_key`]), so one keypair serves both duties.
//!
//! ## Security considerations
//!
//! - We use OS-level RNG (`OsRng`) for key generation. If your OS RNG is
//!   broken, you have bigger problems than Vela.
//! - Key bytes are never logged. If you add logging to this module,
//!   you will be asked to leave.

use ed25519_dalek::{
    Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::codec::hex as hexcodec;
use crate::config::{KEY_HEX_LENGTH, KEY_LENGTH, SIGNATURE_LENGTH};

/// Errors that can occur during key operations.
///
/// These are intentionally vague about *why* something failed -- leaking
/// details about key material through error messages is a classic footgun.
#[derive(Debug, Error)]
pub enum KeyError {
    /// A private key string did not decode to exactly 32 bytes.
    #[error("private key has unexpected size: {got} bytes (expected {KEY_LENGTH})")]
    InvalidKeyLength { got: usize },

    /// A key string was not valid hex at all.
    #[error("key is not a valid {KEY_HEX_LENGTH}-character hex string")]
    InvalidHex(#[source] hexcodec::HexError),

    /// Bytes did not decode to a valid Ed25519 point.
    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,
}

/// A Vela identity keypair wrapping an Ed25519 signing key.
///
/// This is the atomic unit of identity: every address, every signature,
/// every encrypted message ultimately traces back to one of these.
///
/// ## Serialization
///
/// `VelaKeypair` intentionally does NOT implement `Serialize`/`Deserialize`.
/// Exporting a private key should be a deliberate, conscious act, not
/// something that happens because someone shoved a keypair into a JSON
/// response. Use [`private_key_hex`](Self::private_key_hex) explicitly.
pub struct VelaKeypair {
    signing_key: SigningKey,
}

/// The public half of a Vela identity, safe to share with the world.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VelaPublicKey {
    bytes: [u8; KEY_LENGTH],
}

/// An Ed25519 signature over a message. Always exactly 64 bytes.
///
/// If someone hands you bytes that aren't 64 of them, construction fails
/// up front; there is no partially-valid signature state to reason about.
#[derive(Clone, PartialEq, Eq)]
pub struct VelaSignature {
    bytes: [u8; SIGNATURE_LENGTH],
}

impl VelaKeypair {
    /// Generate a fresh keypair using the OS cryptographic RNG.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self { signing_key }
    }

    /// Construct a keypair deterministically from a 32-byte seed.
    ///
    /// The public key is a pure function of the seed; calling this twice
    /// with the same bytes always yields the same identity. Useful for
    /// deriving accounts from KDF output or recovered secrets.
    pub fn from_seed(seed: &[u8; KEY_LENGTH]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Reconstruct a keypair from a hex-encoded private key string.
    ///
    /// This is how wallets hand us keys. The string must decode to exactly
    /// 32 bytes; anything else fails with [`KeyError::InvalidKeyLength`]
    /// (or [`KeyError::InvalidHex`] when it isn't hex to begin with).
    pub fn from_hex(private_key: &str) -> Result<Self, KeyError> {
        let bytes = hexcodec::decode(private_key).map_err(KeyError::InvalidHex)?;
        if bytes.len() != KEY_LENGTH {
            return Err(KeyError::InvalidKeyLength { got: bytes.len() });
        }
        let mut seed = [0u8; KEY_LENGTH];
        seed.copy_from_slice(&bytes);
        Ok(Self::from_seed(&seed))
    }

    /// The public key associated with this keypair.
    pub fn public_key(&self) -> VelaPublicKey {
        VelaPublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// Raw public key bytes. Safe to share, log, tattoo on your arm, etc.
    pub fn public_key_bytes(&self) -> [u8; KEY_LENGTH] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Raw private key bytes.
    ///
    /// **Handle with extreme care.** This is the only secret standing
    /// between an attacker and full control of the account.
    pub fn private_key_bytes(&self) -> [u8; KEY_LENGTH] {
        self.signing_key.to_bytes()
    }

    /// Public key as uppercase hex, 64 characters.
    pub fn public_key_hex(&self) -> String {
        hexcodec::encode_upper(&self.public_key_bytes())
    }

    /// Private key as uppercase hex, 64 characters. See
    /// [`private_key_bytes`](Self::private_key_bytes) for the lecture.
    pub fn private_key_hex(&self) -> String {
        hexcodec::encode_upper(&self.private_key_bytes())
    }

    /// Sign a message, producing a 64-byte Ed25519 signature.
    ///
    /// Deterministic -- the same (key, message) pair always produces the
    /// same signature (RFC 8032). No nonce management, no RNG at signing
    /// time, no sleepless nights.
    pub fn sign(&self, message: &[u8]) -> VelaSignature {
        let sig = self.signing_key.sign(message);
        VelaSignature {
            bytes: sig.to_bytes(),
        }
    }

    /// Verify a signature against this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &VelaSignature) -> bool {
        self.public_key().verify(message, signature)
    }
}

impl Clone for VelaKeypair {
    /// Cloning a keypair is allowed but should make you uncomfortable.
    /// Every copy of a private key is another thing to protect.
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for VelaKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret material in debug output. Not even "partially."
        write!(f, "VelaKeypair(pub={})", self.public_key_hex())
    }
}

impl PartialEq for VelaKeypair {
    /// Two keypairs are equal if their public keys match. Comparing secret
    /// material in a non-constant-time way is a bad habit, and for identity
    /// purposes the public key is what matters.
    fn eq(&self, other: &Self) -> bool {
        self.public_key_bytes() == other.public_key_bytes()
    }
}

impl Eq for VelaKeypair {}

// ---------------------------------------------------------------------------
// VelaPublicKey
// ---------------------------------------------------------------------------

impl VelaPublicKey {
    /// Create a public key from raw bytes.
    ///
    /// No curve validation happens here: the bytes may or may not be a
    /// valid point. That is deliberate -- a remote party's key arrives as
    /// opaque bytes, and whether it unpacks to a point only matters (and is
    /// only checked) at the operation that needs the point, where the
    /// failure can be handled per the message-format rules.
    pub fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Create a public key from a byte slice, validating both the length
    /// and that the bytes decode to a real Ed25519 point.
    ///
    /// Use this at trust boundaries where "not even a point" should be a
    /// loud, early failure instead of a quiet downstream one.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; KEY_LENGTH] = slice
            .try_into()
            .map_err(|_| KeyError::InvalidKeyLength { got: slice.len() })?;
        VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    /// Parse from a hex string (either case), 64 characters.
    pub fn from_hex(input: &str) -> Result<Self, KeyError> {
        let bytes = hexcodec::decode(input).map_err(KeyError::InvalidHex)?;
        let got = bytes.len();
        let bytes: [u8; KEY_LENGTH] = bytes
            .try_into()
            .map_err(|_| KeyError::InvalidKeyLength { got })?;
        Ok(Self { bytes })
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.bytes
    }

    /// Uppercase hex representation, 64 characters.
    pub fn to_hex(&self) -> String {
        hexcodec::encode_upper(&self.bytes)
    }

    /// Verify a signature against this public key.
    ///
    /// Returns a plain boolean: malformed keys and malformed signatures are
    /// both just "no". Giving callers (and attackers) a detailed failure
    /// oracle buys nothing.
    pub fn verify(&self, message: &[u8], signature: &VelaSignature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let dalek_sig = DalekSignature::from_bytes(&signature.bytes);
        verifying_key.verify(message, &dalek_sig).is_ok()
    }
}

impl fmt::Display for VelaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for VelaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VelaPublicKey({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// VelaSignature
// ---------------------------------------------------------------------------

impl VelaSignature {
    /// Create a signature from its raw 64-byte representation.
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self { bytes }
    }

    /// The raw signature bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    /// Uppercase hex representation, 128 characters.
    pub fn to_hex(&self) -> String {
        hexcodec::encode_upper(&self.bytes)
    }

    /// Parse a hex-encoded signature.
    pub fn from_hex(input: &str) -> Result<Self, KeyError> {
        let bytes = hexcodec::decode(input).map_err(KeyError::InvalidHex)?;
        let got = bytes.len();
        let bytes: [u8; SIGNATURE_LENGTH] = bytes
            .try_into()
            .map_err(|_| KeyError::InvalidKeyLength { got })?;
        Ok(Self { bytes })
    }
}

impl fmt::Display for VelaSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for VelaSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "VelaSignature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}
