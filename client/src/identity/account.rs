//! # Accounts
//!
//! An [`Account`] ties a keypair to its address on a specific network and
//! bundles the operations a wallet performs: signing transactions and
//! exchanging encrypted messages.

use tracing::debug;

use crate::crypto::keys::{KeyError, VelaKeypair};
use crate::identity::address::{Address, NetworkType};
use crate::message::MessageEncoder;
use crate::transaction::signing::{sign_transaction, TransactionError};

/// A network-bound account: one keypair, one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    keypair: VelaKeypair,
    address: Address,
}

impl Account {
    /// Generate a brand new account on the given network.
    pub fn generate(network: NetworkType) -> Self {
        let keypair = VelaKeypair::generate();
        let address = Address::from_public_key(&keypair.public_key(), network);
        debug!(%address, %network, "generated account");
        Self { keypair, address }
    }

    /// Reconstruct an account from a hex-encoded private key.
    pub fn from_private_key(private_key: &str, network: NetworkType) -> Result<Self, KeyError> {
        let keypair = VelaKeypair::from_hex(private_key)?;
        let address = Address::from_public_key(&keypair.public_key(), network);
        Ok(Self { keypair, address })
    }

    /// The account's address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The network this account lives on.
    pub fn network_type(&self) -> NetworkType {
        self.address.network_type()
    }

    /// The underlying keypair.
    pub fn keypair(&self) -> &VelaKeypair {
        &self.keypair
    }

    /// Public key as uppercase hex.
    pub fn public_key_hex(&self) -> String {
        self.keypair.public_key_hex()
    }

    /// Private key as uppercase hex. Secret material; handle accordingly.
    pub fn private_key_hex(&self) -> String {
        self.keypair.private_key_hex()
    }

    /// Sign a hex-encoded transaction against a network generation hash,
    /// returning the signed payload as uppercase hex.
    pub fn sign(
        &self,
        transaction_hex: &str,
        generation_hash_hex: &str,
    ) -> Result<String, TransactionError> {
        sign_transaction(transaction_hex, generation_hash_hex, &self.keypair)
    }

    /// A message encoder bound to this account's keypair.
    pub fn message_encoder(&self) -> MessageEncoder {
        MessageEncoder::new(self.keypair.clone())
    }
}
