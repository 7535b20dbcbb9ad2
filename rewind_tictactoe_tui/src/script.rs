//! Non-interactive command scripts for the `replay` subcommand.

use derive_more::{Display, Error};
use rewind_tictactoe::{GameController, GameError, MoveOutcome};
use tracing::{debug, instrument, warn};

/// One scripted UI interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Play a cell (0-8).
    Play(usize),
    /// Jump to a history step.
    Jump(usize),
    /// Toggle move-list order.
    Toggle,
}

/// A token the script parser does not understand.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unknown script token '{}' (expected 0-8, jN or t)", token)]
pub struct ScriptError {
    /// The offending token.
    pub token: String,
}

/// Parses a whitespace-separated script.
#[instrument]
pub fn parse(script: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
    script
        .split_whitespace()
        .map(|token| {
            let unknown = || ScriptError {
                token: token.to_string(),
            };
            if token == "t" {
                Ok(ScriptCommand::Toggle)
            } else if let Some(step) = token.strip_prefix('j') {
                step.parse().map(ScriptCommand::Jump).map_err(|_| unknown())
            } else {
                token.parse().map(ScriptCommand::Play).map_err(|_| unknown())
            }
        })
        .collect()
}

/// Applies commands in order, stopping at the first caller error.
///
/// Rejected moves are logged and skipped, as the UI would.
#[instrument(skip(game, commands), fields(count = commands.len()))]
pub fn run(game: &mut GameController, commands: &[ScriptCommand]) -> Result<(), GameError> {
    for command in commands {
        debug!(?command, "Applying");
        match *command {
            ScriptCommand::Play(cell) => {
                if let MoveOutcome::Rejected(reason) = game.play_move(cell)? {
                    warn!(cell, %reason, "Move ignored");
                }
            }
            ScriptCommand::Jump(step) => game.jump_to(step)?,
            ScriptCommand::Toggle => game.toggle_order(),
        }
    }
    Ok(())
}
