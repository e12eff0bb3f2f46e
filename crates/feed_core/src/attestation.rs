//! Attestation assembly and the published feed record

use crate::impls::{keccak256, recover_signer};
use crate::traits::{FeedError, FeedSigner};
use crate::types::{
    feed_message, Address, Digest32, FeedMessage, FeedValues, RecoverableSignature, FIELD_WIDTH,
    MESSAGE_WIDTH,
};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Status value a well-formed published record carries
pub const STATUS_SUCCESS: &str = "success";

/// Immutable output of one signing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attestation {
    pub values: FeedValues,
    pub message: FeedMessage,
    pub hash: Digest32,
    pub signer: Address,
    pub signature: RecoverableSignature,
}

/// Sign a price feed: encode the four fields, hash the message, sign the
/// digest and assemble the attestation. The single entry point for
/// producing feeds.
pub fn generate_feed(
    values: &FeedValues,
    signer: &impl FeedSigner,
) -> Result<Attestation, FeedError> {
    let message = feed_message(values)?;
    let hash = keccak256(&message);
    let signature = signer.sign_digest(&hash)?;
    assemble(values.clone(), &message, &hash, &signer.address(), signature)
}

/// Compose the final attestation. Pure aggregation; the byte-length
/// checks only guard against internal misuse, since validation proper
/// happens before this point.
pub fn assemble(
    values: FeedValues,
    message: &[u8],
    hash: &[u8],
    signer: &[u8],
    signature: RecoverableSignature,
) -> Result<Attestation, FeedError> {
    let message: FeedMessage = message.try_into().map_err(|_| {
        FeedError::InternalInvariantViolation(format!(
            "message is {} bytes, expected {MESSAGE_WIDTH}",
            message.len()
        ))
    })?;
    let hash: Digest32 = hash.try_into().map_err(|_| {
        FeedError::InternalInvariantViolation(format!(
            "digest is {} bytes, expected {FIELD_WIDTH}",
            hash.len()
        ))
    })?;
    let signer: Address = signer.try_into().map_err(|_| {
        FeedError::InternalInvariantViolation(format!(
            "signer is {} bytes, expected 20",
            signer.len()
        ))
    })?;
    Ok(Attestation {
        values,
        message,
        hash,
        signer,
        signature,
    })
}

impl Attestation {
    /// Re-derive the message and digest from the values and check that
    /// the signature recovers to the recorded signer.
    pub fn verify(&self) -> Result<(), FeedError> {
        let message = feed_message(&self.values)?;
        if message != self.message {
            return Err(FeedError::MalformedRecord(
                "message does not match the numeric fields".to_string(),
            ));
        }
        let hash = keccak256(&self.message);
        if hash != self.hash {
            return Err(FeedError::MalformedRecord(
                "hash does not match the message".to_string(),
            ));
        }
        let recovered = recover_signer(&self.hash, &self.signature)?;
        if recovered != self.signer {
            return Err(FeedError::InvalidSignature);
        }
        Ok(())
    }

    /// The published wire form of this attestation
    pub fn to_record(&self) -> FeedRecord {
        FeedRecord {
            status: STATUS_SUCCESS.to_string(),
            data: FeedData {
                block_number: self.values.block_number.clone(),
                nonce: self.values.nonce.clone(),
                bid_for_1000: self.values.bid_for_1000.clone(),
                ask_for_1000: self.values.ask_for_1000.clone(),
                message: prefixed_hex(&self.message),
                hash: prefixed_hex(&self.hash),
                signer: prefixed_hex(&self.signer),
                v: self.signature.v,
                r: prefixed_hex(&self.signature.r),
                s: prefixed_hex(&self.signature.s),
            },
        }
    }
}

/// The `{status, data}` record the feed endpoint publishes. Byte fields
/// are 0x-prefixed hex; the four value fields are JSON numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedRecord {
    pub status: String,
    pub data: FeedData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedData {
    #[serde(with = "serde_uint256")]
    pub block_number: BigUint,
    #[serde(with = "serde_uint256")]
    pub nonce: BigUint,
    #[serde(with = "serde_uint256")]
    pub bid_for_1000: BigUint,
    #[serde(with = "serde_uint256")]
    pub ask_for_1000: BigUint,
    pub message: String,
    pub hash: String,
    pub signer: String,
    pub v: u8,
    pub r: String,
    pub s: String,
}

impl FeedRecord {
    /// Rebuild the attestation from a published record. Tolerates the
    /// minimal, possibly odd-length r/s hex that legacy emitters
    /// produced; everything else must be exact-width.
    pub fn to_attestation(&self) -> Result<Attestation, FeedError> {
        if self.status != STATUS_SUCCESS {
            return Err(FeedError::MalformedRecord(format!(
                "feed status is {:?}",
                self.status
            )));
        }
        let message = bytes_from_hex(&self.data.message, MESSAGE_WIDTH, "message")?;
        let hash = bytes_from_hex(&self.data.hash, FIELD_WIDTH, "hash")?;
        let signer = bytes_from_hex(&self.data.signer, 20, "signer")?;
        let signature = RecoverableSignature {
            v: self.data.v,
            r: word_from_hex(&self.data.r, "r")?,
            s: word_from_hex(&self.data.s, "s")?,
        };
        let values = FeedValues::new(
            self.data.block_number.clone(),
            self.data.nonce.clone(),
            self.data.ask_for_1000.clone(),
            self.data.bid_for_1000.clone(),
        );
        assemble(values, &message, &hash, &signer, signature)
    }
}

fn prefixed_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode a 0x-prefixed hex field of an exact byte width
fn bytes_from_hex(text: &str, width: usize, field: &str) -> Result<Vec<u8>, FeedError> {
    let digits = text.strip_prefix("0x").ok_or_else(|| {
        FeedError::MalformedRecord(format!("{field} is missing its 0x prefix"))
    })?;
    let raw = hex::decode(digits)
        .map_err(|e| FeedError::MalformedRecord(format!("{field} is not hex: {e}")))?;
    if raw.len() != width {
        return Err(FeedError::MalformedRecord(format!(
            "{field} is {} bytes, expected {width}",
            raw.len()
        )));
    }
    Ok(raw)
}

/// Decode a 0x-prefixed scalar into a left-padded 32-byte word. The
/// legacy emitter wrote minimal hex, so short and odd-length digit
/// strings are accepted.
fn word_from_hex(text: &str, field: &str) -> Result<[u8; 32], FeedError> {
    let digits = text.strip_prefix("0x").ok_or_else(|| {
        FeedError::MalformedRecord(format!("{field} is missing its 0x prefix"))
    })?;
    if digits.is_empty() || digits.len() > 2 * FIELD_WIDTH {
        return Err(FeedError::MalformedRecord(format!(
            "{field} has {} hex digits, expected 1..={}",
            digits.len(),
            2 * FIELD_WIDTH
        )));
    }
    let padded = if digits.len() % 2 == 1 {
        format!("0{digits}")
    } else {
        digits.to_string()
    };
    let raw = hex::decode(&padded)
        .map_err(|e| FeedError::MalformedRecord(format!("{field} is not hex: {e}")))?;
    let mut word = [0u8; 32];
    word[32 - raw.len()..].copy_from_slice(&raw);
    Ok(word)
}

/// Serde adapter keeping 256-bit values as arbitrary-precision JSON
/// numbers, the form big-integer consumers in other languages expect
pub mod serde_uint256 {
    use num_bigint::BigUint;
    use serde::de::Error as DeError;
    use serde::ser::Error as SerError;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        let number = serde_json::Number::from_str(&value.to_str_radix(10))
            .map_err(S::Error::custom)?;
        number.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;
        BigUint::from_str(&number.to_string())
            .map_err(|_| D::Error::custom("expected a non-negative integer"))
    }
}
