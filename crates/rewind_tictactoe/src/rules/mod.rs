//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating a board snapshot.
//! Rules are kept apart from history and turn tracking so the controller
//! can re-evaluate any past step on demand.

pub mod draw;
pub mod win;

pub use draw::{is_dead_board, is_dead_line, is_full};
pub use win::{LINES, winning_line};

use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Outcome of evaluating one board snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinResult {
    /// Nobody has won and at least one line is still live.
    NoWinner,
    /// Every line already holds both symbols.
    Draw,
    /// A player completed a line.
    Win {
        /// The winning player.
        player: Player,
        /// The three cell indices of the winning line.
        line: [usize; 3],
    },
}

impl WinResult {
    /// True for `Draw` and `Win`.
    pub fn is_decided(&self) -> bool {
        !matches!(self, WinResult::NoWinner)
    }
}

/// Evaluates a board: win first, then dead-board draw.
#[instrument]
pub fn evaluate(board: &Board) -> WinResult {
    if let Some((player, line)) = winning_line(board) {
        WinResult::Win { player, line }
    } else if is_dead_board(board) {
        WinResult::Draw
    } else {
        WinResult::NoWinner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_empty_board() {
        assert_eq!(evaluate(&Board::new()), WinResult::NoWinner);
        assert!(!evaluate(&Board::new()).is_decided());
    }

    #[test]
    fn test_evaluate_reports_first_line() {
        // X owns the left column and the main diagonal; columns come first.
        let board = [0, 3, 6, 4, 8]
            .into_iter()
            .fold(Board::new(), |b, pos| b.with_mark(pos, Player::X).unwrap());
        let board = [1, 2, 5, 7]
            .into_iter()
            .fold(board, |b, pos| b.with_mark(pos, Player::O).unwrap());
        assert_eq!(
            evaluate(&board),
            WinResult::Win {
                player: Player::X,
                line: [0, 3, 6]
            }
        );
    }
}
