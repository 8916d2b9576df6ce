//! # Vela Addresses
//!
//! The human-facing account identifier: a 39-character base32 string derived
//! from a public key, a network byte, and a truncated-hash checksum.
//!
//! ## Derivation
//!
//! ```text
//! hash      = SHA3-256(public_key)[..20]
//! payload   = network_byte ++ hash              (21 bytes)
//! checksum  = SHA3-256(payload)[..3]
//! raw       = payload ++ checksum               (24 bytes)
//! encoded   = base32(raw ++ 0x00)[..39]         (39 characters)
//! ```
//!
//! 24 bytes is not a whole number of base32 blocks, so encoding pads with a
//! single zero byte and drops the final character (which depends only on the
//! pad). Decoding reverses the trick by appending an `A` before decoding.
//!
//! The first character of an address is a pure function of the network byte
//! (the top five bits of the first raw byte), which is why mainnet addresses
//! start with `N` and testnet addresses with `T`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::codec::base32;
use crate::config::{
    ADDRESS_CHECKSUM_LENGTH, ADDRESS_HASH_LENGTH, ENCODED_ADDRESS_LENGTH, RAW_ADDRESS_LENGTH,
};
use crate::crypto::hash::sha3_256;
use crate::crypto::keys::VelaPublicKey;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when parsing or validating an address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// The encoded string is not exactly 39 characters.
    #[error("address has unexpected length: {got} characters (expected {ENCODED_ADDRESS_LENGTH})")]
    InvalidLength { got: usize },

    /// A character outside the base32 alphabet appeared in the address.
    #[error("invalid character '{character}' at position {position} in address")]
    InvalidCharacter { character: char, position: usize },

    /// The network byte does not correspond to a known network.
    #[error("unknown network byte: {byte:#04x}")]
    UnknownNetwork { byte: u8 },

    /// The embedded checksum does not match the address payload.
    #[error("address checksum mismatch")]
    ChecksumMismatch,
}

impl From<base32::Base32Error> for AddressError {
    fn from(err: base32::Base32Error) -> Self {
        match err {
            base32::Base32Error::InvalidCharacter {
                character,
                position,
            } => AddressError::InvalidCharacter {
                character,
                position,
            },
            // Length errors are pre-checked at the 39-character boundary,
            // but map the decoded form anyway rather than panicking.
            base32::Base32Error::InvalidEncodedLength { got }
            | base32::Base32Error::InvalidDecodedLength { got } => {
                AddressError::InvalidLength { got }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// NetworkType
// ---------------------------------------------------------------------------

/// The network an address belongs to.
///
/// The discriminant is the network byte embedded in every address, chosen so
/// that encoded mainnet addresses start with `N` and testnet addresses with
/// `T`. An address is only meaningful relative to its network; a testnet
/// address is not "almost" a mainnet address, it is a different identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NetworkType {
    /// The production network.
    Mainnet = 0x68,
    /// The public test network.
    Testnet = 0x98,
}

impl NetworkType {
    /// The raw network byte, as embedded in addresses.
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for NetworkType {
    type Error = AddressError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x68 => Ok(NetworkType::Mainnet),
            0x98 => Ok(NetworkType::Testnet),
            other => Err(AddressError::UnknownNetwork { byte: other }),
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::Mainnet => write!(f, "mainnet"),
            NetworkType::Testnet => write!(f, "testnet"),
        }
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A Vela account address: network byte, 20-byte public key hash, and a
/// 3-byte checksum.
///
/// Construct one from a public key with [`Address::from_public_key`] or
/// parse a user-supplied string with [`Address::from_encoded`]. The latter
/// validates length, alphabet, network byte, and checksum, so a successfully
/// parsed `Address` is always internally consistent.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    network: NetworkType,
    bytes: [u8; RAW_ADDRESS_LENGTH],
}

impl Address {
    /// Derive the address of a public key on the given network.
    pub fn from_public_key(public_key: &VelaPublicKey, network: NetworkType) -> Self {
        let key_hash = sha3_256(public_key.as_bytes());

        let mut bytes = [0u8; RAW_ADDRESS_LENGTH];
        bytes[0] = network.as_byte();
        bytes[1..=ADDRESS_HASH_LENGTH].copy_from_slice(&key_hash[..ADDRESS_HASH_LENGTH]);

        let checksum = sha3_256(&bytes[..=ADDRESS_HASH_LENGTH]);
        bytes[1 + ADDRESS_HASH_LENGTH..].copy_from_slice(&checksum[..ADDRESS_CHECKSUM_LENGTH]);

        Self { network, bytes }
    }

    /// Parse a 39-character encoded address, validating everything.
    pub fn from_encoded(encoded: &str) -> Result<Self, AddressError> {
        if encoded.chars().count() != ENCODED_ADDRESS_LENGTH {
            return Err(AddressError::InvalidLength {
                got: encoded.chars().count(),
            });
        }

        // Re-append the character the encoder dropped. 'A' decodes to zero
        // bits, which is exactly what the encoder padded with.
        let padded = format!("{encoded}A");
        let decoded = base32::decode(&padded)?;

        // The final character carries three bits that land in the 25th byte,
        // past the raw address. A canonical encoder always leaves them zero;
        // accepting nonzero values would let eight distinct strings parse to
        // the same address.
        if decoded[RAW_ADDRESS_LENGTH] != 0 {
            return Err(AddressError::InvalidCharacter {
                character: encoded.chars().next_back().unwrap_or('\0'),
                position: ENCODED_ADDRESS_LENGTH - 1,
            });
        }

        let mut bytes = [0u8; RAW_ADDRESS_LENGTH];
        bytes.copy_from_slice(&decoded[..RAW_ADDRESS_LENGTH]);

        let network = NetworkType::try_from(bytes[0])?;
        let address = Self { network, bytes };
        if !address.validate_checksum() {
            return Err(AddressError::ChecksumMismatch);
        }
        Ok(address)
    }

    /// Recompute the checksum over the payload and compare to the stored one.
    pub fn validate_checksum(&self) -> bool {
        let checksum = sha3_256(&self.bytes[..=ADDRESS_HASH_LENGTH]);
        self.bytes[1 + ADDRESS_HASH_LENGTH..] == checksum[..ADDRESS_CHECKSUM_LENGTH]
    }

    /// The 39-character base32 representation.
    pub fn encoded(&self) -> String {
        let mut padded = [0u8; RAW_ADDRESS_LENGTH + 1];
        padded[..RAW_ADDRESS_LENGTH].copy_from_slice(&self.bytes);

        let mut encoded = base32::encode(&padded)
            .expect("25 bytes is a whole number of base32 blocks");
        encoded.truncate(ENCODED_ADDRESS_LENGTH);
        encoded
    }

    /// Which network this address belongs to.
    pub fn network_type(&self) -> NetworkType {
        self.network
    }

    /// The raw 24-byte form: network byte, key hash, checksum.
    pub fn as_bytes(&self) -> &[u8; RAW_ADDRESS_LENGTH] {
        &self.bytes
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encoded())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({}, {})", self.network, self.encoded())
    }
}

impl Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.encoded())
        } else {
            serializer.serialize_bytes(&self.bytes)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Address::from_encoded(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            if bytes.len() != RAW_ADDRESS_LENGTH {
                return Err(serde::de::Error::custom(format!(
                    "expected {RAW_ADDRESS_LENGTH}-byte address, got {}",
                    bytes.len()
                )));
            }
            let mut raw = [0u8; RAW_ADDRESS_LENGTH];
            raw.copy_from_slice(&bytes);
            let network = NetworkType::try_from(raw[0]).map_err(serde::de::Error::custom)?;
            Ok(Address {
                network,
                bytes: raw,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::VelaKeypair;

    fn some_address(network: NetworkType) -> Address {
        let kp = VelaKeypair::from_seed(&[0x51; 32]);
        Address::from_public_key(&kp.public_key(), network)
    }

    #[test]
    fn encoded_address_is_39_chars() {
        assert_eq!(some_address(NetworkType::Mainnet).encoded().len(), 39);
        assert_eq!(some_address(NetworkType::Testnet).encoded().len(), 39);
    }

    #[test]
    fn mainnet_addresses_start_with_n() {
        // 0x68 >> 3 == 13 == 'N'. A property of the network byte, not luck.
        let addr = some_address(NetworkType::Mainnet);
        assert!(addr.encoded().starts_with('N'), "got {}", addr.encoded());
    }

    #[test]
    fn testnet_addresses_start_with_t() {
        let addr = some_address(NetworkType::Testnet);
        assert!(addr.encoded().starts_with('T'), "got {}", addr.encoded());
    }

    #[test]
    fn encode_decode_roundtrip() {
        let addr = some_address(NetworkType::Mainnet);
        let parsed = Address::from_encoded(&addr.encoded()).unwrap();
        assert_eq!(addr, parsed);
        assert_eq!(parsed.network_type(), NetworkType::Mainnet);
    }

    #[test]
    fn derivation_is_deterministic() {
        let kp = VelaKeypair::from_seed(&[3u8; 32]);
        let a1 = Address::from_public_key(&kp.public_key(), NetworkType::Mainnet);
        let a2 = Address::from_public_key(&kp.public_key(), NetworkType::Mainnet);
        assert_eq!(a1, a2);
    }

    #[test]
    fn networks_produce_different_addresses() {
        let kp = VelaKeypair::from_seed(&[4u8; 32]);
        let mainnet = Address::from_public_key(&kp.public_key(), NetworkType::Mainnet);
        let testnet = Address::from_public_key(&kp.public_key(), NetworkType::Testnet);
        assert_ne!(mainnet.encoded(), testnet.encoded());
    }

    #[test]
    fn wrong_length_rejected() {
        assert_eq!(
            Address::from_encoded("NABC"),
            Err(AddressError::InvalidLength { got: 4 })
        );
        let too_long = "A".repeat(40);
        assert_eq!(
            Address::from_encoded(&too_long),
            Err(AddressError::InvalidLength { got: 40 })
        );
    }

    #[test]
    fn invalid_character_rejected() {
        let addr = some_address(NetworkType::Mainnet);
        let mut s = addr.encoded();
        // '1' is not in the base32 alphabet.
        s.replace_range(5..6, "1");
        assert_eq!(
            Address::from_encoded(&s),
            Err(AddressError::InvalidCharacter {
                character: '1',
                position: 5
            })
        );
    }

    #[test]
    fn corrupted_checksum_rejected() {
        let addr = some_address(NetworkType::Mainnet);
        let s = addr.encoded();
        // Flip a mid-address character to another alphabet character. The
        // payload changes but the embedded checksum does not follow.
        let target = s.as_bytes()[10];
        let replacement = if target == b'A' { 'B' } else { 'A' };
        let mut s = s;
        s.replace_range(10..11, &replacement.to_string());
        assert_eq!(
            Address::from_encoded(&s),
            Err(AddressError::ChecksumMismatch)
        );
    }

    #[test]
    fn unknown_network_byte_rejected() {
        // Build a raw address with a bogus network byte and valid checksum,
        // then encode it by hand.
        let mut raw = [0u8; 25];
        raw[0] = 0x42;
        let checksum = sha3_256(&raw[..21]);
        raw[21..24].copy_from_slice(&checksum[..3]);
        let mut encoded = base32::encode(&raw).unwrap();
        encoded.truncate(39);
        assert_eq!(
            Address::from_encoded(&encoded),
            Err(AddressError::UnknownNetwork { byte: 0x42 })
        );
    }

    #[test]
    fn non_canonical_final_character_rejected() {
        // The last character's low three bits spill past the 24th byte, so
        // a canonical address always ends on a value with those bits zero.
        // Bumping the final character by one keeps the 24 decoded bytes
        // identical; parsing must refuse it rather than alias the address.
        const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
        let mut s = some_address(NetworkType::Mainnet).encoded();

        let last = s.pop().unwrap();
        let value = ALPHABET.iter().position(|&c| c == last as u8).unwrap();
        assert_eq!(value % 8, 0, "canonical final character has zero pad bits");
        let bumped = ALPHABET[value + 1] as char;
        s.push(bumped);

        assert_eq!(
            Address::from_encoded(&s),
            Err(AddressError::InvalidCharacter {
                character: bumped,
                position: 38
            })
        );
    }

    #[test]
    fn checksum_validates_on_fresh_address() {
        assert!(some_address(NetworkType::Mainnet).validate_checksum());
    }

    #[test]
    fn serde_json_uses_encoded_string() {
        let addr = some_address(NetworkType::Testnet);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", addr.encoded()));
        let parsed: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, parsed);
    }

    #[test]
    fn network_byte_roundtrip() {
        assert_eq!(NetworkType::try_from(0x68), Ok(NetworkType::Mainnet));
        assert_eq!(NetworkType::try_from(0x98), Ok(NetworkType::Testnet));
        assert_eq!(
            NetworkType::try_from(0x00),
            Err(AddressError::UnknownNetwork { byte: 0x00 })
        );
    }
}
