use clap::Parser;

use sweetshop_api::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => sweetshop_api::cli::serve::run().await,
    }
}
