//! Replay a command log and show where the match ended up.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use chegg_core::{AbilityRegistry, BoardDump, Side};
use chegg_runtime::{MatchLog, Session};

use super::ContentArgs;

#[derive(Parser)]
pub struct Replay {
    /// Command log to replay (defaults to CHEGG_COMMAND_LOG)
    #[arg(value_name = "LOG", env = "CHEGG_COMMAND_LOG")]
    log: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "board")]
    format: OutputFormat,

    #[command(flatten)]
    content: ContentArgs,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Board dump plus turn and player summary
    Board,
    /// Board dump followed by one line per unit
    Details,
    /// Full match state as JSON
    Json,
}

impl Replay {
    pub fn execute(self) -> Result<()> {
        let (units, _) = self.content.registry()?;
        let log = MatchLog::read(&self.log)
            .with_context(|| format!("Failed to read command log {}", self.log.display()))?;
        tracing::info!(
            target: "chegg::session",
            commands = log.commands.len(),
            "replaying {}",
            self.log.display()
        );

        let session = Session::replay(units, AbilityRegistry::new(), &log)
            .with_context(|| format!("Replay of {} failed", self.log.display()))?;
        let state = session.state();

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(state)?);
            }
            OutputFormat::Details => {
                print!("{}", BoardDump::render_details(state, session.units()));
            }
            OutputFormat::Board => {
                print!("{}", session.board_dump());
                println!();
                println!(
                    "turn {} ({}), {} to move",
                    state.turn.number,
                    state.phase(),
                    state.current_side()
                );
                for side in Side::ALL {
                    let player = state.player(side);
                    println!(
                        "{side}: mana {}, hand {}, deck {}",
                        player.mana,
                        player.hand.len(),
                        player.deck.len()
                    );
                }
                if let Some(winner) = state.winner() {
                    println!("winner: {winner}");
                }
            }
        }
        Ok(())
    }
}
