use crate::keys::KeyArgs;
use anyhow::Result;
use clap::Args;
use feed_core::{generate_feed, parse_field_value, FeedValues};
use num_bigint::BigUint;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Args)]
#[command(about = "Sign a price feed and print the JSON record")]
pub struct GenerateArgs {
    /// Block number the quotes were observed at
    #[arg(long)]
    pub block_number: String,

    /// Feed nonce; defaults to the current Unix timestamp
    #[arg(long)]
    pub nonce: Option<String>,

    /// Ask quote for 1000 units
    #[arg(long)]
    pub ask_for_1000: String,

    /// Bid quote for 1000 units
    #[arg(long)]
    pub bid_for_1000: String,

    #[command(flatten)]
    pub key: KeyArgs,
}

pub async fn handle_generate_command(args: GenerateArgs) -> Result<()> {
    let signer = args.key.build_signer()?;

    let nonce = match &args.nonce {
        Some(text) => parse_field_value(text)?,
        None => BigUint::from(
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        ),
    };
    let values = FeedValues::new(
        parse_field_value(&args.block_number)?,
        nonce,
        parse_field_value(&args.ask_for_1000)?,
        parse_field_value(&args.bid_for_1000)?,
    );

    let attestation = generate_feed(&values, &signer)?;
    println!("{}", serde_json::to_string_pretty(&attestation.to_record())?);
    Ok(())
}
