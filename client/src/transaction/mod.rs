//! Transaction signing: turning an unsigned serialized transaction plus a
//! network generation hash into a fully signed payload.

pub mod signing;

pub use signing::{
    attach_signature, compute_signing_bytes, sign_transaction, TransactionError,
};
