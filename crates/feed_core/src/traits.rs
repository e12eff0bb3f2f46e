//! Error taxonomy and the signing seam for feed attestations

use crate::types::{Address, Digest32, RecoverableSignature};
use thiserror::Error;

/// Error types for feed encoding and signing
#[derive(Error, Debug)]
pub enum FeedError {
    /// A numeric field is negative or does not fit in 256 bits
    #[error("field value out of range for a 256-bit big-endian encoding")]
    OutOfRange,
    /// Private key is zero or not below the curve order
    #[error("invalid secp256k1 private key")]
    InvalidKey,
    /// The underlying signature primitive failed
    #[error("signing failed: {0}")]
    SigningError(String),
    /// Recovery failed or the recovered signer does not match
    #[error("signature verification failed")]
    InvalidSignature,
    /// A record produced elsewhere carries malformed or mis-sized content
    #[error("malformed feed record: {0}")]
    MalformedRecord(String),
    /// A byte-length invariant broke inside the assembler; indicates a bug
    #[error("internal invariant violation: {0}")]
    InternalInvariantViolation(String),
}

/// Seam between attestation assembly and the concrete curve backend
pub trait FeedSigner {
    /// Sign a 32-byte digest, producing chain-convention (v, r, s)
    fn sign_digest(&self, digest: &Digest32) -> Result<RecoverableSignature, FeedError>;

    /// The 20-byte address of the signing key
    fn address(&self) -> Address;
}
