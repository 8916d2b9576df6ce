//! Account identity: network-scoped addresses derived from public keys, and
//! the [`Account`] type that bundles a keypair with its address.

pub mod account;
pub mod address;

pub use account::Account;
pub use address::{Address, AddressError, NetworkType};
