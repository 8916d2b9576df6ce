//! # Transaction Signing
//!
//! A serialized transaction arrives as hex with a 108-byte header laid out as
//!
//! ```text
//! offset  size  field
//!      0     4  payload size
//!      4     4  verifiable-entity reserved
//!      8    64  signature
//!     72    32  signer public key
//!    104     4  entity-body reserved
//!    108     -  transaction body
//! ```
//!
//! The signature does NOT cover the header. What gets signed is the 32-byte
//! network generation hash concatenated with the body; the generation hash
//! binds the signature to one specific network, so a testnet transaction can
//! never be replayed on mainnet. After signing, the signature and signer key
//! are spliced back into their header slots.

use tracing::debug;

use crate::codec::hex as hexcodec;
use crate::config::{
    GENERATION_HASH_LENGTH, TX_HEADER_LENGTH, TX_RESERVED_LENGTH, TX_SIGNATURE_OFFSET,
};
use crate::crypto::keys::{VelaKeypair, VelaPublicKey, VelaSignature};
use thiserror::Error;

/// Errors that can occur while signing a transaction.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// The transaction or generation hash string is not valid hex.
    #[error("malformed transaction hex")]
    MalformedHex(#[source] hexcodec::HexError),

    /// The transaction is shorter than its mandatory header.
    #[error("transaction too short: {got} bytes (header alone is {TX_HEADER_LENGTH})")]
    TruncatedTransaction { got: usize },

    /// The generation hash is not exactly 32 bytes.
    #[error("generation hash has unexpected size: {got} bytes (expected {GENERATION_HASH_LENGTH})")]
    InvalidGenerationHash { got: usize },
}

/// Build the exact byte string the signature covers:
/// `generation_hash ++ transaction[108..]`.
pub fn compute_signing_bytes(
    transaction: &[u8],
    generation_hash: &[u8; GENERATION_HASH_LENGTH],
) -> Result<Vec<u8>, TransactionError> {
    if transaction.len() < TX_HEADER_LENGTH {
        return Err(TransactionError::TruncatedTransaction {
            got: transaction.len(),
        });
    }

    let body = &transaction[TX_HEADER_LENGTH..];
    let mut signing_bytes = Vec::with_capacity(GENERATION_HASH_LENGTH + body.len());
    signing_bytes.extend_from_slice(generation_hash);
    signing_bytes.extend_from_slice(body);
    Ok(signing_bytes)
}

/// Splice a signature and signer public key into a transaction's header.
///
/// Rebuilds the payload as
/// `tx[0..8] ++ signature ++ public_key ++ zeros(4) ++ tx[108..]`.
/// The entity-body reserved field is zeroed regardless of its input value.
pub fn attach_signature(
    transaction: &[u8],
    signature: &VelaSignature,
    signer: &VelaPublicKey,
) -> Result<Vec<u8>, TransactionError> {
    if transaction.len() < TX_HEADER_LENGTH {
        return Err(TransactionError::TruncatedTransaction {
            got: transaction.len(),
        });
    }

    let mut payload = Vec::with_capacity(transaction.len());
    payload.extend_from_slice(&transaction[..TX_SIGNATURE_OFFSET]);
    payload.extend_from_slice(signature.as_bytes());
    payload.extend_from_slice(signer.as_bytes());
    payload.extend_from_slice(&[0u8; TX_RESERVED_LENGTH]);
    payload.extend_from_slice(&transaction[TX_HEADER_LENGTH..]);
    Ok(payload)
}

/// Sign a hex-encoded transaction and return the signed payload as
/// uppercase hex.
///
/// This is the whole pipeline: decode, check lengths, compute signing
/// bytes, sign, splice, re-encode.
pub fn sign_transaction(
    transaction_hex: &str,
    generation_hash_hex: &str,
    keypair: &VelaKeypair,
) -> Result<String, TransactionError> {
    let transaction =
        hexcodec::decode(transaction_hex).map_err(TransactionError::MalformedHex)?;

    let gh_bytes =
        hexcodec::decode(generation_hash_hex).map_err(TransactionError::MalformedHex)?;
    let got = gh_bytes.len();
    let generation_hash: [u8; GENERATION_HASH_LENGTH] = gh_bytes
        .try_into()
        .map_err(|_| TransactionError::InvalidGenerationHash { got })?;

    let signing_bytes = compute_signing_bytes(&transaction, &generation_hash)?;
    let signature = keypair.sign(&signing_bytes);
    let payload = attach_signature(&transaction, &signature, &keypair.public_key())?;

    debug!(
        payload_len = payload.len(),
        signer = %keypair.public_key(),
        "signed transaction"
    );
    Ok(hexcodec::encode_upper(&payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TX_SIGNER_OFFSET, SIGNATURE_LENGTH};

    /// A minimal well-formed unsigned transaction: 108-byte header (size
    /// field set, everything else zero) plus an arbitrary body.
    fn unsigned_tx(body: &[u8]) -> Vec<u8> {
        let mut tx = vec![0u8; TX_HEADER_LENGTH];
        let size = (TX_HEADER_LENGTH + body.len()) as u32;
        tx[..4].copy_from_slice(&size.to_le_bytes());
        tx.extend_from_slice(body);
        tx
    }

    #[test]
    fn signing_bytes_are_generation_hash_plus_body() {
        let tx = unsigned_tx(b"hello body");
        let gh = [0xAA; 32];
        let bytes = compute_signing_bytes(&tx, &gh).unwrap();
        assert_eq!(&bytes[..32], &gh);
        assert_eq!(&bytes[32..], b"hello body");
    }

    #[test]
    fn empty_body_signs_generation_hash_only() {
        let tx = unsigned_tx(b"");
        let gh = [0xBB; 32];
        let bytes = compute_signing_bytes(&tx, &gh).unwrap();
        assert_eq!(bytes, gh.to_vec());
    }

    #[test]
    fn truncated_transaction_rejected() {
        let gh = [0u8; 32];
        let result = compute_signing_bytes(&[0u8; 107], &gh);
        assert!(matches!(
            result,
            Err(TransactionError::TruncatedTransaction { got: 107 })
        ));
    }

    #[test]
    fn attach_signature_preserves_layout() {
        let kp = VelaKeypair::from_seed(&[9u8; 32]);
        let tx = unsigned_tx(b"body bytes");
        let sig = kp.sign(b"whatever");
        let payload = attach_signature(&tx, &sig, &kp.public_key()).unwrap();

        assert_eq!(payload.len(), tx.len());
        assert_eq!(&payload[..8], &tx[..8]);
        assert_eq!(
            &payload[TX_SIGNATURE_OFFSET..TX_SIGNATURE_OFFSET + SIGNATURE_LENGTH],
            sig.as_bytes()
        );
        assert_eq!(
            &payload[TX_SIGNER_OFFSET..TX_SIGNER_OFFSET + 32],
            kp.public_key().as_bytes()
        );
        assert_eq!(&payload[104..108], &[0u8; 4]);
        assert_eq!(&payload[108..], b"body bytes");
    }

    #[test]
    fn signed_payload_verifies() {
        let kp = VelaKeypair::from_seed(&[1u8; 32]);
        let tx = unsigned_tx(b"transfer to somewhere");
        let gh = [0x42; 32];

        let signed_hex = sign_transaction(
            &hexcodec::encode_upper(&tx),
            &hexcodec::encode_upper(&gh),
            &kp,
        )
        .unwrap();
        let signed = hexcodec::decode(&signed_hex).unwrap();

        let mut sig_bytes = [0u8; SIGNATURE_LENGTH];
        sig_bytes.copy_from_slice(
            &signed[TX_SIGNATURE_OFFSET..TX_SIGNATURE_OFFSET + SIGNATURE_LENGTH],
        );
        let sig = VelaSignature::from_bytes(sig_bytes);

        let signing_bytes = compute_signing_bytes(&signed, &gh).unwrap();
        assert!(kp.public_key().verify(&signing_bytes, &sig));
    }

    #[test]
    fn output_is_uppercase_hex() {
        let kp = VelaKeypair::from_seed(&[2u8; 32]);
        let tx = unsigned_tx(b"x");
        let signed = sign_transaction(
            &hexcodec::encode_upper(&tx),
            &hexcodec::encode_upper(&[0u8; 32]),
            &kp,
        )
        .unwrap();
        assert!(signed.chars().all(|c| !c.is_ascii_lowercase()));
    }

    #[test]
    fn lowercase_input_accepted() {
        let kp = VelaKeypair::from_seed(&[3u8; 32]);
        let tx = unsigned_tx(b"y");
        let upper = sign_transaction(
            &hexcodec::encode_upper(&tx),
            &hexcodec::encode_upper(&[5u8; 32]),
            &kp,
        )
        .unwrap();
        let lower = sign_transaction(
            &hexcodec::encode_upper(&tx).to_ascii_lowercase(),
            &hexcodec::encode_upper(&[5u8; 32]).to_ascii_lowercase(),
            &kp,
        )
        .unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn bad_hex_rejected() {
        let kp = VelaKeypair::from_seed(&[4u8; 32]);
        assert!(matches!(
            sign_transaction("zz", &hexcodec::encode_upper(&[0u8; 32]), &kp),
            Err(TransactionError::MalformedHex(_))
        ));
    }

    #[test]
    fn wrong_generation_hash_length_rejected() {
        let kp = VelaKeypair::from_seed(&[5u8; 32]);
        let tx = unsigned_tx(b"z");
        assert!(matches!(
            sign_transaction(&hexcodec::encode_upper(&tx), "ABCD", &kp),
            Err(TransactionError::InvalidGenerationHash { got: 2 })
        ));
    }

    #[test]
    fn signature_excludes_header() {
        // Two transactions that differ only in header bytes outside the
        // spliced fields produce payloads with the same signature.
        let kp = VelaKeypair::from_seed(&[6u8; 32]);
        let gh = hexcodec::encode_upper(&[7u8; 32]);

        let tx1 = unsigned_tx(b"same body");
        let mut tx2 = tx1.clone();
        tx2[4] = 0xFF; // verifiable-entity reserved field

        let s1 = sign_transaction(&hexcodec::encode_upper(&tx1), &gh, &kp).unwrap();
        let s2 = sign_transaction(&hexcodec::encode_upper(&tx2), &gh, &kp).unwrap();
        let p1 = hexcodec::decode(&s1).unwrap();
        let p2 = hexcodec::decode(&s2).unwrap();
        assert_eq!(
            &p1[TX_SIGNATURE_OFFSET..TX_SIGNATURE_OFFSET + SIGNATURE_LENGTH],
            &p2[TX_SIGNATURE_OFFSET..TX_SIGNATURE_OFFSET + SIGNATURE_LENGTH]
        );
    }

    #[test]
    fn different_generation_hashes_different_signatures() {
        // The generation hash is the replay barrier between networks.
        let kp = VelaKeypair::from_seed(&[8u8; 32]);
        let tx = hexcodec::encode_upper(&unsigned_tx(b"body"));

        let s1 = sign_transaction(&tx, &hexcodec::encode_upper(&[1u8; 32]), &kp).unwrap();
        let s2 = sign_transaction(&tx, &hexcodec::encode_upper(&[2u8; 32]), &kp).unwrap();
        assert_ne!(s1, s2);
    }
}
