//! Core functionality for the price feed signer.
//!
//! Encodes the four feed fields into a canonical 128-byte message,
//! hashes it with Keccak-256 and signs the digest with a recoverable
//! secp256k1 signature, yielding an attestation any verifier can check
//! by recovering the signer address.

pub mod attestation;
pub mod impls;
pub mod traits;
pub mod types;


pub use attestation::*;
pub use impls::*;
pub use traits::*;
pub use types::*;
