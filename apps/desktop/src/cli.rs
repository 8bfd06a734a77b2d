use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments of the desktop client.
#[derive(Debug, Parser)]
#[command(name = "hustler-desktop")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "SurveyHustler registration client")]
pub struct Cli {
    /// Telegram id to register, as passed by the bot's deep link
    #[arg(long)]
    pub tg_id: Option<String>,

    /// Configuration file (defaults to `client.toml` in the working directory when present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}
