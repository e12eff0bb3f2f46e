use anyhow::Result;
use clap::Args;
use feed_core::FeedRecord;
use std::io::Read;
use std::path::PathBuf;

#[derive(Args)]
#[command(about = "Verify a stored feed record")]
pub struct VerifyArgs {
    /// Record file to verify; stdin when omitted
    #[arg(long)]
    pub file: Option<PathBuf>,
}

pub async fn handle_verify_command(args: VerifyArgs) -> Result<()> {
    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let record: FeedRecord = serde_json::from_str(&text)?;
    let attestation = record.to_attestation()?;
    attestation.verify()?;

    println!("Feed record is valid");
    println!("Signer: 0x{}", hex::encode(attestation.signer));
    println!("Block number: {}", attestation.values.block_number);
    println!("Nonce: {}", attestation.values.nonce);
    println!("Ask for 1000: {}", attestation.values.ask_for_1000);
    println!("Bid for 1000: {}", attestation.values.bid_for_1000);
    Ok(())
}
