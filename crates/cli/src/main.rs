//! Developer tools for Chegg.
//!
//! Run with: `cargo run -p chegg-cli -- <command>`

mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use commands::{Deck, Replay, Roster, Validate};

/// Developer tools for Chegg
#[derive(Parser)]
#[command(name = "chegg")]
#[command(about = "Replay matches and inspect Chegg content", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Replay a JSON-lines command log and print the resulting board
    Replay(Replay),

    /// Load a mod directory and report every problem found
    Validate(Validate),

    /// List the unit roster, built-ins plus mods
    Roster(Roster),

    /// Check a deck list and print its statistics
    Deck(Deck),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for CHEGG_* variables)
    let _ = dotenvy::dotenv();
    logging::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay(cmd) => cmd.execute(),
        Command::Validate(cmd) => cmd.execute(),
        Command::Roster(cmd) => cmd.execute(),
        Command::Deck(cmd) => cmd.execute(),
    }
}
