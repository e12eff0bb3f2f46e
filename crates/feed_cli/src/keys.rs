use anyhow::{bail, Result};
use clap::Args;
use feed_core::Secp256k1Signer;
use std::path::PathBuf;

/// Key source flags shared by signing commands
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Hex-encoded private key
    #[arg(long, conflicts_with_all = ["key_file", "passphrase", "passphrase_file"])]
    pub private_key: Option<String>,

    /// File holding a hex-encoded private key
    #[arg(long, conflicts_with_all = ["passphrase", "passphrase_file"])]
    pub key_file: Option<PathBuf>,

    /// Brainwallet passphrase; the key is its SHA-256
    #[arg(long, conflicts_with = "passphrase_file")]
    pub passphrase: Option<String>,

    /// File holding the passphrase
    #[arg(long)]
    pub passphrase_file: Option<PathBuf>,
}

impl KeyArgs {
    pub fn build_signer(&self) -> Result<Secp256k1Signer> {
        if let Some(key) = &self.private_key {
            return Ok(Secp256k1Signer::from_hex(key)?);
        }
        if let Some(path) = &self.key_file {
            let text = std::fs::read_to_string(path)?;
            return Ok(Secp256k1Signer::from_hex(text.trim())?);
        }
        if let Some(passphrase) = &self.passphrase {
            return Ok(Secp256k1Signer::from_passphrase(passphrase)?);
        }
        if let Some(path) = &self.passphrase_file {
            let text = std::fs::read_to_string(path)?;
            return Ok(Secp256k1Signer::from_passphrase(text.trim())?);
        }
        bail!(
            "no key material given; pass --private-key, --key-file, \
             --passphrase or --passphrase-file"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_core::FeedSigner;

    #[test]
    fn test_passphrase_flag_builds_the_expected_signer() {
        let args = KeyArgs {
            private_key: None,
            key_file: None,
            passphrase: Some("some big long brainwallet password".to_string()),
            passphrase_file: None,
        };
        let signer = args.build_signer().unwrap();
        assert_eq!(
            hex::encode(signer.address()),
            "a5d2ffd4c4c8d10b1f42144281af033abb1858bf"
        );
    }

    #[test]
    fn test_no_key_material_fails() {
        let args = KeyArgs {
            private_key: None,
            key_file: None,
            passphrase: None,
            passphrase_file: None,
        };
        assert!(args.build_signer().is_err());
    }
}
