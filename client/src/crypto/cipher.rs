//! # Symmetric Encryption
//!
//! AES-256-GCM with a 12-byte IV and a 16-byte authentication tag, the
//! symmetric layer under encrypted messages.
//!
//! The wire format carries the tag and ciphertext as separate fields, so the
//! API here keeps them separate too. Internally the AEAD implementation
//! appends the tag to the ciphertext; we split and rejoin at this boundary
//! and nowhere else.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

use crate::config::{AES_IV_LENGTH, AES_KEY_LENGTH, AES_TAG_LENGTH};

/// Errors from symmetric encryption and decryption.
///
/// Decryption failure deliberately carries no detail. "Wrong key",
/// "tampered ciphertext" and "corrupted tag" all look identical from the
/// outside, which is exactly how an AEAD should behave.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    #[error("encryption failed")]
    EncryptFailed,

    #[error("decryption failed: authentication tag mismatch")]
    DecryptFailed,
}

/// An AES-256-GCM cipher bound to a single 32-byte key.
pub struct AesGcmCipher {
    key: [u8; AES_KEY_LENGTH],
}

impl AesGcmCipher {
    /// Create a cipher from a 32-byte key, typically the output of
    /// [`crate::crypto::shared_key::derive_shared_key`].
    pub fn new(key: [u8; AES_KEY_LENGTH]) -> Self {
        Self { key }
    }

    /// Encrypt a plaintext under the given IV.
    ///
    /// Returns `(ciphertext, tag)` where the ciphertext is exactly the
    /// length of the plaintext. The IV must be unique per encryption under
    /// the same key; use [`random_iv`] unless you have a very good reason
    /// not to.
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        iv: &[u8; AES_IV_LENGTH],
    ) -> Result<(Vec<u8>, [u8; AES_TAG_LENGTH]), CipherError> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key));
        let nonce = Nonce::from_slice(iv);

        let mut combined = cipher
            .encrypt(nonce, Payload::from(plaintext))
            .map_err(|_| CipherError::EncryptFailed)?;

        // The AEAD appends the 16-byte tag; peel it off.
        let tag_start = combined.len() - AES_TAG_LENGTH;
        let mut tag = [0u8; AES_TAG_LENGTH];
        tag.copy_from_slice(&combined[tag_start..]);
        combined.truncate(tag_start);
        Ok((combined, tag))
    }

    /// Decrypt a ciphertext, verifying the authentication tag.
    ///
    /// A single flipped bit anywhere in the ciphertext, tag, or IV yields
    /// [`CipherError::DecryptFailed`] rather than garbage plaintext.
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        tag: &[u8; AES_TAG_LENGTH],
        iv: &[u8; AES_IV_LENGTH],
    ) -> Result<Vec<u8>, CipherError> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key));
        let nonce = Nonce::from_slice(iv);

        let mut combined = Vec::with_capacity(ciphertext.len() + AES_TAG_LENGTH);
        combined.extend_from_slice(ciphertext);
        combined.extend_from_slice(tag);

        cipher
            .decrypt(nonce, Payload::from(combined.as_slice()))
            .map_err(|_| CipherError::DecryptFailed)
    }
}

/// Generate a fresh random 12-byte IV from the OS RNG.
pub fn random_iv() -> [u8; AES_IV_LENGTH] {
    let mut iv = [0u8; AES_IV_LENGTH];
    OsRng.fill_bytes(&mut iv);
    iv
}
