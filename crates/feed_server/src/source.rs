//! Price sources and the periodic feed refresher

use crate::config::FeedConfig;
use crate::AppState;
use feed_core::{generate_feed, FeedError, FeedValues};
use serde::Deserialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{error, info};

/// One quote from the price source
#[derive(Debug, Clone, Deserialize)]
pub struct PriceQuote {
    pub block_number: u64,
    pub ask_for_1000: u64,
    pub bid_for_1000: u64,
}

/// Error types for quote fetching and re-signing
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("price source request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Feed(#[from] FeedError),
}

/// Where quotes come from: an upstream JSON endpoint or static config values
#[derive(Debug, Clone)]
pub enum PriceSource {
    Upstream { url: String },
    Static(PriceQuote),
}

impl PriceSource {
    pub fn from_config(config: &FeedConfig) -> Self {
        match &config.source_url {
            Some(url) => PriceSource::Upstream { url: url.clone() },
            None => PriceSource::Static(PriceQuote {
                block_number: config.static_block_number,
                ask_for_1000: config.static_ask_for_1000,
                bid_for_1000: config.static_bid_for_1000,
            }),
        }
    }

    pub async fn fetch_quote(&self) -> Result<PriceQuote, SourceError> {
        match self {
            PriceSource::Static(quote) => Ok(quote.clone()),
            PriceSource::Upstream { url } => {
                let client = reqwest::Client::builder()
                    .timeout(Duration::from_secs(10))
                    .build()?;
                let quote = client
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .json::<PriceQuote>()
                    .await?;
                Ok(quote)
            }
        }
    }
}

/// Fetch the current quote and publish a freshly signed attestation.
/// The nonce is the Unix timestamp of the refresh.
pub async fn refresh_once(state: &AppState) -> Result<(), SourceError> {
    let quote = state.source.fetch_quote().await?;
    let values = FeedValues::from_u64(
        quote.block_number,
        unix_now(),
        quote.ask_for_1000,
        quote.bid_for_1000,
    );
    let attestation = generate_feed(&values, state.signer.as_ref())?;
    info!(
        block_number = quote.block_number,
        ask_for_1000 = quote.ask_for_1000,
        bid_for_1000 = quote.bid_for_1000,
        "published fresh feed attestation"
    );
    *state.latest.write().await = Some(attestation);
    Ok(())
}

/// Spawn the background task that keeps the published feed current
pub fn start_refresher(state: AppState) {
    let period = state.config.feed.refresh_interval_secs.max(1);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(period));
        loop {
            interval.tick().await;
            if let Err(e) = refresh_once(&state).await {
                error!("feed refresh failed: {e}");
            }
        }
    });
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
