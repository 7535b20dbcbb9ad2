//! Command-line interface for rewind_tictactoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rewind Tic-Tac-Toe - tic-tac-toe with move history and time travel
#[derive(Parser, Debug)]
#[command(name = "rewind_tictactoe")]
#[command(about = "Tic-tac-toe with move history and time travel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the settings file (defaults are used if it does not exist)
    #[arg(short, long, default_value = "rewind_tictactoe.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play,

    /// Apply a script of commands and print the resulting game
    Replay {
        /// Whitespace-separated commands: `0`-`8` plays a cell, `jN` jumps
        /// to step N, `t` toggles the move-list order
        script: String,
    },
}
