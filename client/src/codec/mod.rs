//! # Byte Codecs
//!
//! Pure byte transforms shared by the rest of the crate: hex and the
//! address-flavored base32. No crypto in here, no I/O, no state -- just
//! bit arithmetic that has to be exactly right.
//!
//! The base32 implementation is deliberately hand-rolled rather than pulled
//! from a generic encoding crate: the address format depends on the precise
//! block/offset arithmetic (including how the final partial block is handled),
//! and a general-purpose encoder's padding behavior is not the same thing.

pub mod base32;
pub mod hex;

pub use base32::Base32Error;
pub use hex::HexError;
