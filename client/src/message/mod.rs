//! # Encrypted Messages
//!
//! End-to-end encrypted messages between two accounts, carried inside
//! transactions.
//!
//! ## Wire format
//!
//! ```text
//! [0x01] ++ tag(16) ++ iv(12) ++ ciphertext
//! ```
//!
//! The leading marker byte distinguishes encrypted messages from plain ones.
//! The header is 29 bytes, so any payload shorter than that cannot possibly
//! be an encrypted message.
//!
//! ## Decoding never fails
//!
//! A message arriving from the chain may be plaintext, encrypted for
//! someone else, corrupted, or hostile. None of those are errors from the
//! caller's point of view; they are just messages that did not decode.
//! [`MessageEncoder::try_decode`] therefore returns [`DecodedMessage`]
//! instead of a `Result`: either the decrypted text, or the original bytes
//! untouched.

use tracing::{debug, trace};

use crate::codec::hex as hexcodec;
use crate::config::{
    AES_IV_LENGTH, AES_TAG_LENGTH, MESSAGE_HEADER_LENGTH, MESSAGE_MARKER,
};
use crate::crypto::cipher::{random_iv, AesGcmCipher, CipherError};
use crate::crypto::keys::{VelaKeypair, VelaPublicKey};
use crate::crypto::shared_key::{derive_shared_key, SharedKeyError};
use thiserror::Error;

/// Errors from message encoding.
///
/// Only encoding can fail loudly; decoding failures fold into
/// [`DecodedMessage::NotEncoded`].
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("shared key derivation failed")]
    SharedKey(#[from] SharedKeyError),

    #[error("encryption failed")]
    Cipher(#[from] CipherError),
}

/// The outcome of attempting to decode a message payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedMessage {
    /// The payload decrypted and authenticated under the derived key.
    Decoded(String),

    /// The payload is not an encrypted message for this key pair. The
    /// original bytes are returned unmodified.
    NotEncoded(Vec<u8>),
}

impl DecodedMessage {
    /// Whether decryption succeeded.
    pub fn is_decoded(&self) -> bool {
        matches!(self, DecodedMessage::Decoded(_))
    }
}

/// Encrypts and decrypts messages on behalf of one keypair.
///
/// Each message is keyed to a specific remote party: the same encoder
/// produces different ciphertexts for different recipients, and can only
/// decode messages whose sender it is given.
pub struct MessageEncoder {
    keypair: VelaKeypair,
}

impl MessageEncoder {
    pub fn new(keypair: VelaKeypair) -> Self {
        Self { keypair }
    }

    /// Encrypt a message for a recipient.
    ///
    /// Fails only if the recipient's public key is not a valid curve point;
    /// with a well-formed key this cannot fail.
    pub fn encode(
        &self,
        recipient: &VelaPublicKey,
        message: &str,
    ) -> Result<Vec<u8>, MessageError> {
        let key = derive_shared_key(&self.keypair.private_key_bytes(), recipient.as_bytes())?;
        let iv = random_iv();
        let (ciphertext, tag) = AesGcmCipher::new(key).encrypt(message.as_bytes(), &iv)?;

        let mut payload = Vec::with_capacity(MESSAGE_HEADER_LENGTH + ciphertext.len());
        payload.push(MESSAGE_MARKER);
        payload.extend_from_slice(&tag);
        payload.extend_from_slice(&iv);
        payload.extend_from_slice(&ciphertext);

        debug!(len = payload.len(), "encoded encrypted message");
        Ok(payload)
    }

    /// Attempt to decode a payload as a message encrypted by `sender`.
    ///
    /// Anything that is not a well-formed encrypted message for this pair
    /// of keys comes back as [`DecodedMessage::NotEncoded`] with the input
    /// bytes intact. This function does not fail.
    pub fn try_decode(&self, sender: &VelaPublicKey, payload: &[u8]) -> DecodedMessage {
        if payload.len() < MESSAGE_HEADER_LENGTH || payload[0] != MESSAGE_MARKER {
            return DecodedMessage::NotEncoded(payload.to_vec());
        }

        let mut tag = [0u8; AES_TAG_LENGTH];
        tag.copy_from_slice(&payload[1..1 + AES_TAG_LENGTH]);
        let mut iv = [0u8; AES_IV_LENGTH];
        iv.copy_from_slice(&payload[1 + AES_TAG_LENGTH..MESSAGE_HEADER_LENGTH]);
        let ciphertext = &payload[MESSAGE_HEADER_LENGTH..];

        let key = match derive_shared_key(&self.keypair.private_key_bytes(), sender.as_bytes()) {
            Ok(key) => key,
            Err(SharedKeyError::InvalidPoint) => {
                trace!("sender public key is not a curve point, treating as plain");
                return DecodedMessage::NotEncoded(payload.to_vec());
            }
        };

        match AesGcmCipher::new(key).decrypt(ciphertext, &tag, &iv) {
            Ok(plaintext) => {
                // Each byte becomes one char, mirroring the historical
                // text handling. Multi-byte UTF-8 input round-trips to a
                // different (longer) string; callers needing exact UTF-8
                // should compare bytes.
                let text: String = plaintext.iter().map(|&b| char::from(b)).collect();
                DecodedMessage::Decoded(text)
            }
            Err(_) => {
                debug!("message failed authentication, treating as plain");
                DecodedMessage::NotEncoded(payload.to_vec())
            }
        }
    }

    /// Decode a payload that may use the legacy hex-encoded transport,
    /// where everything after the marker byte was hex text instead of raw
    /// bytes.
    ///
    /// When the marker is present and the remainder is valid hex, the
    /// payload is the legacy form: the hex is converted back to raw bytes
    /// and the result of decoding those is returned as-is, so a failed
    /// legacy payload comes back as `NotEncoded` of the *converted* bytes.
    /// Anything else decodes through [`try_decode`](Self::try_decode)
    /// unchanged.
    #[deprecated(note = "legacy hex transport; use try_decode for current payloads")]
    pub fn try_decode_deprecated(
        &self,
        sender: &VelaPublicKey,
        payload: &[u8],
    ) -> DecodedMessage {
        if !payload.is_empty() && payload[0] == MESSAGE_MARKER {
            if let Ok(hex_str) = std::str::from_utf8(&payload[1..]) {
                if let Ok(mut raw) = hexcodec::decode(hex_str) {
                    let mut converted = Vec::with_capacity(1 + raw.len());
                    converted.push(MESSAGE_MARKER);
                    converted.append(&mut raw);
                    return self.try_decode(sender, &converted);
                }
            }
        }
        self.try_decode(sender, payload)
    }
}
