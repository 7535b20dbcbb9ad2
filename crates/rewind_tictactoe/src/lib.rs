//! Tic-tac-toe with move history and time travel.
//!
//! The crate is the pure game core of a turn-based UI: every move records an
//! immutable board snapshot, any earlier step can be selected again, and
//! playing from an earlier step discards the abandoned future.
//!
//! # Architecture
//!
//! - **Rules**: win detection in fixed line order, dead-board draw detection
//! - **Position**: cell index to (row, col) mapping
//! - **History**: append-only snapshots with tail truncation
//! - **Controller**: turns, selected step, move-list order
//!
//! # Example
//!
//! ```
//! use rewind_tictactoe::{GameController, Player, Status};
//!
//! let mut game = GameController::new();
//! for cell in [0, 1, 4, 2, 8] {
//!     game.play_move(cell)?;
//! }
//! assert_eq!(game.current_status(), Status::Winner(Player::X));
//! assert_eq!(game.highlighted_line(), Some([0, 4, 8]));
//!
//! game.jump_to(2)?;
//! assert_eq!(game.current_status(), Status::NextPlayer(Player::X));
//! # Ok::<(), rewind_tictactoe::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod controller;
mod error;
mod history;
mod position;
pub mod rules;
mod types;

pub use controller::{GameController, MoveListItem, MoveOutcome, RejectReason, Status};
pub use error::GameError;
pub use history::{GameHistory, HistoryEntry, Move};
pub use position::{Coordinates, Position, to_row_col};
pub use rules::{WinResult, evaluate};
pub use types::{Board, Player, Square};
