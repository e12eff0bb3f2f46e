use crate::api::FeedClient;
use anyhow::Result;
use clap::Args;

#[derive(Args)]
#[command(about = "Fetch a feed record from an endpoint and verify it")]
pub struct FetchArgs {
    /// Feed endpoint URL
    #[arg(long, default_value = "http://127.0.0.1:3090/feed")]
    pub url: String,
}

pub async fn handle_fetch_command(args: FetchArgs) -> Result<()> {
    let client = FeedClient::new(args.url.clone());
    let record = client.fetch_feed().await?;
    let attestation = record.to_attestation()?;
    attestation.verify()?;

    println!("Fetched a valid feed from {}", args.url);
    println!("Signer: 0x{}", hex::encode(attestation.signer));
    println!("Block number: {}", attestation.values.block_number);
    println!("Ask for 1000: {}", attestation.values.ask_for_1000);
    println!("Bid for 1000: {}", attestation.values.bid_for_1000);
    Ok(())
}
