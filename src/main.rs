use anyhow::Context;
use clap::Parser;
use cryptodip::adapter::inbound::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    run::execute(&cli)
        .await
        .with_context(|| format!("cryptodip failed (config {})", cli.config.display()))
}
