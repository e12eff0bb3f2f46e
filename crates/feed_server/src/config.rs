//! Configuration management for the feed server

use feed_core::{FeedError, Secp256k1Signer};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Feed signing and price source configuration
    pub feed: FeedConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

/// Signing key and price source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Hex-encoded private key; prefer passphrase_file outside development
    #[serde(default)]
    pub private_key: Option<String>,
    /// Brainwallet passphrase; the key is its SHA-256
    #[serde(default)]
    pub passphrase: Option<String>,
    /// File holding the passphrase, surrounding whitespace ignored
    #[serde(default)]
    pub passphrase_file: Option<String>,
    /// Upstream quote endpoint returning
    /// {block_number, ask_for_1000, bid_for_1000}
    #[serde(default)]
    pub source_url: Option<String>,
    /// Static quote used when no source_url is configured
    pub static_block_number: u64,
    pub static_ask_for_1000: u64,
    pub static_bid_for_1000: u64,
    /// Seconds between refreshes of the published feed
    pub refresh_interval_secs: u64,
}

impl AppConfig {
    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            // Default configuration
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3090)?
            .set_default("feed.static_block_number", 0)?
            .set_default("feed.static_ask_for_1000", 0)?
            .set_default("feed.static_bid_for_1000", 0)?
            .set_default("feed.refresh_interval_secs", 300)?
            // Environment variables
            .add_source(config::Environment::with_prefix("FEED").separator("__"))
            // Configuration file
            .add_source(config::File::with_name("config/feeder").required(false))
            .build()?;

        config.try_deserialize()
    }

    /// Get the socket address for the server
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }

    /// Build the signing backend from whichever key source is configured
    pub fn build_signer(&self) -> Result<Secp256k1Signer, FeedError> {
        if let Some(key) = &self.feed.private_key {
            return Secp256k1Signer::from_hex(key);
        }
        if let Some(passphrase) = &self.feed.passphrase {
            return Secp256k1Signer::from_passphrase(passphrase);
        }
        if let Some(path) = &self.feed.passphrase_file {
            let text = std::fs::read_to_string(path)
                .map_err(|e| FeedError::SigningError(format!("reading {path}: {e}")))?;
            return Secp256k1Signer::from_passphrase(text.trim());
        }
        Err(FeedError::SigningError(
            "no signing key configured; set feed.private_key, feed.passphrase \
             or feed.passphrase_file"
                .to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_core::FeedSigner;

    fn base_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            feed: FeedConfig {
                private_key: None,
                passphrase: None,
                passphrase_file: None,
                source_url: None,
                static_block_number: 0,
                static_ask_for_1000: 0,
                static_bid_for_1000: 0,
                refresh_interval_secs: 300,
            },
        }
    }

    #[test]
    fn test_signer_from_passphrase_config() {
        let mut config = base_config();
        config.feed.passphrase = Some("some big long brainwallet password".to_string());
        let signer = config.build_signer().unwrap();
        assert_eq!(
            hex::encode(signer.address()),
            "a5d2ffd4c4c8d10b1f42144281af033abb1858bf"
        );
    }

    #[test]
    fn test_missing_key_material_is_an_error() {
        assert!(base_config().build_signer().is_err());
    }

    #[test]
    fn test_private_key_takes_precedence() {
        let mut config = base_config();
        config.feed.private_key =
            Some("0x0000000000000000000000000000000000000000000000000000000000000001".to_string());
        config.feed.passphrase = Some("ignored".to_string());
        let signer = config.build_signer().unwrap();
        assert_eq!(
            hex::encode(signer.address()),
            "7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }
}
