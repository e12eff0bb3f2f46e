//! Core types and canonical message encoding for price feed attestations

use crate::traits::FeedError;
use num_bigint::{BigInt, BigUint, Sign};
use std::str::FromStr;

/// Width of one encoded field in bytes (256 bits)
pub const FIELD_WIDTH: usize = 32;

/// Width of the canonical feed message: four fields back to back
pub const MESSAGE_WIDTH: usize = 4 * FIELD_WIDTH;

/// 20-byte address derived from a secp256k1 public key
pub type Address = [u8; 20];

/// Keccak-256 digest
pub type Digest32 = [u8; 32];

/// Canonical 128-byte feed message
pub type FeedMessage = [u8; MESSAGE_WIDTH];

/// The four numeric fields of a price feed, each an unsigned 256-bit integer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedValues {
    pub block_number: BigUint,
    pub nonce: BigUint,
    pub ask_for_1000: BigUint,
    pub bid_for_1000: BigUint,
}

impl FeedValues {
    pub fn new(
        block_number: BigUint,
        nonce: BigUint,
        ask_for_1000: BigUint,
        bid_for_1000: BigUint,
    ) -> Self {
        Self {
            block_number,
            nonce,
            ask_for_1000,
            bid_for_1000,
        }
    }

    /// Convenience constructor for values that fit in a machine word
    pub fn from_u64(block_number: u64, nonce: u64, ask_for_1000: u64, bid_for_1000: u64) -> Self {
        Self::new(
            BigUint::from(block_number),
            BigUint::from(nonce),
            BigUint::from(ask_for_1000),
            BigUint::from(bid_for_1000),
        )
    }
}

/// Recoverable ECDSA signature in the chain convention: v is 27 or 28,
/// r and s are 32-byte big-endian scalars with s in low form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature {
    pub v: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

/// Encode a single non-negative integer as a fixed-width big-endian field,
/// left-padded with zero bytes. Values wider than 256 bits are rejected,
/// never truncated.
pub fn encode_field(value: &BigUint) -> Result<[u8; FIELD_WIDTH], FeedError> {
    if value.bits() as usize > FIELD_WIDTH * 8 {
        return Err(FeedError::OutOfRange);
    }
    let raw = value.to_bytes_be();
    let mut field = [0u8; FIELD_WIDTH];
    field[FIELD_WIDTH - raw.len()..].copy_from_slice(&raw);
    Ok(field)
}

/// Build the canonical 128-byte message. The field order
/// {block_number, nonce, ask_for_1000, bid_for_1000} is a wire contract:
/// verifiers reconstruct the message from individually known values.
pub fn feed_message(values: &FeedValues) -> Result<FeedMessage, FeedError> {
    let fields = [
        &values.block_number,
        &values.nonce,
        &values.ask_for_1000,
        &values.bid_for_1000,
    ];
    let mut message = [0u8; MESSAGE_WIDTH];
    for (i, value) in fields.iter().enumerate() {
        message[i * FIELD_WIDTH..(i + 1) * FIELD_WIDTH].copy_from_slice(&encode_field(value)?);
    }
    Ok(message)
}

/// Parse a decimal field value. Negative inputs are out of range,
/// non-numeric inputs are malformed.
pub fn parse_field_value(text: &str) -> Result<BigUint, FeedError> {
    let signed = BigInt::from_str(text.trim())
        .map_err(|_| FeedError::MalformedRecord(format!("not a decimal integer: {text:?}")))?;
    if signed.sign() == Sign::Minus {
        return Err(FeedError::OutOfRange);
    }
    let value = signed.magnitude().clone();
    if value.bits() as usize > FIELD_WIDTH * 8 {
        return Err(FeedError::OutOfRange);
    }
    Ok(value)
}
