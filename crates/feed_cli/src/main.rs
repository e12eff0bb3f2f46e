mod api;
mod commands;
mod keys;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "feed-cli")]
#[command(about = "Price feed attestation CLI")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a price feed and print the JSON record
    Generate(commands::generate::GenerateArgs),
    /// Verify a stored feed record
    Verify(commands::verify::VerifyArgs),
    /// Fetch a feed record from an endpoint and verify it
    Fetch(commands::fetch::FetchArgs),
    /// Generate a new secp256k1 keypair
    Keygen(commands::keygen::KeygenArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => commands::generate::handle_generate_command(args).await,
        Commands::Verify(args) => commands::verify::handle_verify_command(args).await,
        Commands::Fetch(args) => commands::fetch::handle_fetch_command(args).await,
        Commands::Keygen(args) => commands::keygen::handle_keygen_command(args).await,
    }
}
