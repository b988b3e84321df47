use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod chat;
pub mod history;
pub mod serve;

use crate::core::AppConfig;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "5000")]
        port: String,
    },
    /// Start a chat session in the terminal
    Chat {
        /// Model to switch to before the first question
        #[arg(long)]
        model: Option<String>,
    },
    /// Print the most recent stored conversations
    History {
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            let config = AppConfig::from_env()?;
            serve::run(host, port, config).await?;
        }
        Some(Command::Chat { model }) => {
            let config = AppConfig::from_env()?;
            chat::run(config, model).await?;
        }
        Some(Command::History { limit }) => {
            let config = AppConfig::from_env()?;
            history::run(config, limit).await?;
        }
        None => {}
    }

    Ok(())
}
