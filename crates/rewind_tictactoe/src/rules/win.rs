//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Player, Square};
use tracing::instrument;

/// The 8 winning lines, in evaluation order.
///
/// Rows top-to-bottom, then columns left-to-right, then the main and anti
/// diagonals. The first match in this order is the one reported.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the first completed line and its owner, if any.
#[instrument]
pub fn winning_line(board: &Board) -> Option<(Player, [usize; 3])> {
    for line @ [a, b, c] in LINES {
        let sq = board.get(a);
        if sq == board.get(b) && sq == board.get(c) {
            if let Some(Square::Occupied(player)) = sq {
                return Some((player, line));
            }
        }
    }
    None
}
