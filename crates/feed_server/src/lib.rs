//! Feed server library

pub mod api;
pub mod config;
pub mod models;
pub mod source;

pub use config::*;
pub use models::*;
pub use source::*;

use feed_core::{Attestation, Secp256k1Signer};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub signer: Arc<Secp256k1Signer>,
    pub latest: Arc<RwLock<Option<Attestation>>>,
    pub source: PriceSource,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, signer: Secp256k1Signer) -> Self {
        let source = PriceSource::from_config(&config.feed);
        Self {
            signer: Arc::new(signer),
            latest: Arc::new(RwLock::new(None)),
            source,
            config: Arc::new(config),
        }
    }
}
