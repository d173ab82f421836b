use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reelbot")]
#[command(author, version, about = "Telegram bot that sends back YouTube and Instagram videos", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot with long polling (default)
    Run,

    /// Download a single link locally without Telegram
    Fetch {
        /// YouTube or Instagram link
        url: String,

        /// Directory the selected video is copied to (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
