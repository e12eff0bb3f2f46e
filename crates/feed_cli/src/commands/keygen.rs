use anyhow::Result;
use clap::Args;
use feed_core::{FeedSigner, Secp256k1Signer};

#[derive(Args)]
#[command(about = "Generate a new secp256k1 keypair")]
pub struct KeygenArgs {}

pub async fn handle_keygen_command(_args: KeygenArgs) -> Result<()> {
    let signer = Secp256k1Signer::random();

    println!("Keypair generated successfully!");
    println!("Private Key (hex): {}", hex::encode(signer.secret_bytes()));
    println!("Address: 0x{}", hex::encode(signer.address()));

    Ok(())
}
