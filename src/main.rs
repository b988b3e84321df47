use anyhow::Result;
use groqchat::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
