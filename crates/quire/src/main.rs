mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("QUIRE_LOG"))
        .with_writer(std::io::stderr)
        .init();

    cli::App::parse().run().await
}
