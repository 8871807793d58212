//! Binary crate for the `quickweather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive prompts (city, unit toggle)
//! - Rendering reports as plain or colorized terminal output

use clap::Parser;
use quickweather_core::ApiCredentials;

mod cli;
mod prompt;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials are read once here and passed down; nothing else touches
    // the environment.
    let credentials = ApiCredentials::from_env();
    let cmd = cli::Cli::parse();
    cmd.run(credentials).await
}
