//! Cryptographic primitives for Vela: Ed25519 identity keys, the shared-key
//! derivation used for encrypted messaging, AES-256-GCM, and hash helpers.
//!
//! Everything here builds on audited RustCrypto / dalek implementations.
//! This module composes them; it does not implement primitives.

pub mod cipher;
pub mod hash;
pub mod keys;
pub mod shared_key;

pub use cipher::{random_iv, AesGcmCipher, CipherError};
pub use keys::{KeyError, VelaKeypair, VelaPublicKey, VelaSignature};
pub use shared_key::{derive_shared_key, derive_shared_secret, SharedKeyError};
