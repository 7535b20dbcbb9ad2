//! Draw detection logic for tic-tac-toe.
//!
//! A board is drawn once every winning line is dead, i.e. already holds
//! both an X and an O. This can happen before the board is full.

use super::win::LINES;
use crate::types::{Board, Player, Square};
use tracing::instrument;

/// Checks whether a line contains both symbols and can never be won.
pub fn is_dead_line(board: &Board, line: [usize; 3]) -> bool {
    let has = |player| {
        line.iter()
            .any(|&pos| board.get(pos) == Some(Square::Occupied(player)))
    };
    has(Player::X) && has(Player::O)
}

/// Checks whether all 8 winning lines are dead.
#[instrument]
pub fn is_dead_board(board: &Board) -> bool {
    LINES.iter().all(|&line| is_dead_line(board, line))
}

/// Checks if the board is full (all squares occupied).
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}
