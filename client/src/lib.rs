// Copyright (c) 2026 Vela Labs. MIT License.
// See LICENSE for details.

//! # Vela Client -- Identity & Signing Core
//!
//! The cryptographic core of a Vela wallet: keypairs, addresses,
//! transaction signing, and end-to-end encrypted messages.
//!
//! The primitive choices are boring on purpose: Ed25519 for signatures,
//! the same curve's Diffie-Hellman for message keys (one keypair, both
//! duties), and AES-256-GCM for the symmetric layer. Nothing in this crate
//! is novel cryptography, and that is a feature.
//!
//! ## Architecture
//!
//! The crate is split into modules that mirror the actual concerns of a
//! wallet:
//!
//! - **codec** -- Hex and base32. The unglamorous load-bearing layer.
//! - **crypto** -- Keys, shared-key derivation, AEAD, hashes.
//! - **identity** -- Addresses and accounts, one network byte apart.
//! - **message** -- Encrypted messages between accounts.
//! - **transaction** -- Signing serialized transactions for broadcast.
//! - **config** -- Wire-format constants and sizes.
//!
//! ## Design Philosophy
//!
//! 1. Wire compatibility is sacred. A byte offset is a promise.
//! 2. Decoding untrusted input never panics and never leaks why it failed.
//! 3. Secret material stays out of logs, errors, and `Debug` output.
//! 4. Anything that can produce an invalid signature gets a pinned test.
//!
//! ## Quick start
//!
//! ```
//! use vela_client::identity::{Account, NetworkType};
//!
//! let alice = Account::generate(NetworkType::Testnet);
//! let bob = Account::generate(NetworkType::Testnet);
//!
//! // Addresses are 39-character base32 strings.
//! assert_eq!(alice.address().encoded().len(), 39);
//!
//! // Encrypted messages only decode with the right keys.
//! let payload = alice
//!     .message_encoder()
//!     .encode(&bob.keypair().public_key(), "hello bob")
//!     .unwrap();
//! let decoded = bob
//!     .message_encoder()
//!     .try_decode(&alice.keypair().public_key(), &payload);
//! assert!(decoded.is_decoded());
//! ```

pub mod codec;
pub mod config;
pub mod crypto;
pub mod identity;
pub mod message;
pub mod transaction;
