//! Request and response bodies for the feed API

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Body of POST /feed/sign: the four feed values to sign, as
/// arbitrary-precision JSON numbers
#[derive(Debug, Clone, Deserialize)]
pub struct SignFeedRequest {
    #[serde(with = "feed_core::serde_uint256")]
    pub block_number: BigUint,
    #[serde(with = "feed_core::serde_uint256")]
    pub nonce: BigUint,
    #[serde(with = "feed_core::serde_uint256")]
    pub ask_for_1000: BigUint,
    #[serde(with = "feed_core::serde_uint256")]
    pub bid_for_1000: BigUint,
}

/// Body of GET /status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    /// 0x-prefixed signer address; the key itself never leaves the server
    pub signer: String,
    pub feed_published: bool,
}

/// Error body mirroring the record's status field convention
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: String,
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: message.into(),
        }
    }
}
