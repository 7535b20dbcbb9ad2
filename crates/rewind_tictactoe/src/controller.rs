//! Turn orchestration, time travel and move-list ordering.

use crate::error::GameError;
use crate::history::{GameHistory, HistoryEntry, Move};
use crate::position::Position;
use crate::rules::{WinResult, evaluate};
use crate::types::{Board, Player, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Status line for the selected step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Status {
    /// Every line is dead.
    #[display("Draw")]
    Draw,
    /// A player completed a line.
    #[display("Winner: {}", _0)]
    Winner(Player),
    /// The game continues with this player to move.
    #[display("Next player: {}", _0)]
    NextPlayer(Player),
}

/// Why a move was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum RejectReason {
    /// The target cell already holds a mark.
    #[display("Square {} is already occupied", _0)]
    CellOccupied(Position),
    /// The selected step is already won or drawn.
    #[display("Game is already decided")]
    GameDecided,
}

/// Result of a [`GameController::play_move`] call that was not a caller error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The move was recorded.
    Played(Move),
    /// The move was ignored and no state changed.
    Rejected(RejectReason),
}

impl MoveOutcome {
    /// True if the move was recorded.
    pub fn is_played(&self) -> bool {
        matches!(self, MoveOutcome::Played(_))
    }
}

/// One row of the rendered move list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveListItem {
    /// History step this item jumps to.
    pub step: usize,
    /// Display text.
    pub label: String,
    /// Whether this is the selected step.
    pub selected: bool,
}

/// Game session state: history, selected step and list order.
///
/// The player to move is always derived from the selected step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordedController")]
pub struct GameController {
    history: GameHistory,
    selected_step: usize,
    ascending_order: bool,
}

/// Unchecked wire form of [`GameController`].
#[derive(Deserialize)]
struct RecordedController {
    history: GameHistory,
    selected_step: usize,
    ascending_order: bool,
}

impl TryFrom<RecordedController> for GameController {
    type Error = GameError;

    fn try_from(recorded: RecordedController) -> Result<Self, Self::Error> {
        recorded.history.at(recorded.selected_step)?;
        Ok(Self {
            history: recorded.history,
            selected_step: recorded.selected_step,
            ascending_order: recorded.ascending_order,
        })
    }
}

impl GameController {
    /// Creates a new session at the game start, listing moves ascending.
    #[instrument]
    pub fn new() -> Self {
        Self::with_order(true)
    }

    /// Creates a new session with the given move-list order.
    #[instrument]
    pub fn with_order(ascending_order: bool) -> Self {
        Self {
            history: GameHistory::new(),
            selected_step: 0,
            ascending_order,
        }
    }

    /// Plays `cell` for the player of the selected step.
    ///
    /// Moves on an occupied cell or a decided board are rejected without
    /// touching any state. Playing from an earlier step discards every
    /// later entry first.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidIndex`] if `cell` is outside 0-8.
    #[instrument(skip(self), fields(step = self.selected_step))]
    pub fn play_move(&mut self, cell: usize) -> Result<MoveOutcome, GameError> {
        let position = Position::from_index(cell).ok_or(GameError::InvalidIndex { index: cell })?;
        let current = *self.history.at(self.selected_step)?.board();

        if evaluate(&current).is_decided() {
            debug!("Move rejected: game decided");
            return Ok(MoveOutcome::Rejected(RejectReason::GameDecided));
        }
        if !current.is_empty(cell) {
            debug!(%position, "Move rejected: square occupied");
            return Ok(MoveOutcome::Rejected(RejectReason::CellOccupied(position)));
        }

        let player = Player::for_step(self.selected_step);
        let next = current.with_mark(cell, player)?;
        let played = Move::new(player, position);

        self.history.truncate(self.selected_step)?;
        self.history.append(next, played);
        self.selected_step = self.history.len() - 1;

        info!(%played, step = self.selected_step, "Move played");
        match evaluate(&next) {
            WinResult::Win { player, line } => info!(%player, ?line, "Game won"),
            WinResult::Draw => info!("Game drawn"),
            WinResult::NoWinner => {}
        }
        Ok(MoveOutcome::Played(played))
    }

    /// Selects a history step for display and play.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IndexOutOfRange`] if `step` is past the last entry.
    #[instrument(skip(self))]
    pub fn jump_to(&mut self, step: usize) -> Result<(), GameError> {
        self.history.at(step)?;
        self.selected_step = step;
        debug!(step, "Jumped");
        Ok(())
    }

    /// Flips the move-list display order.
    #[instrument(skip(self))]
    pub fn toggle_order(&mut self) {
        self.ascending_order = !self.ascending_order;
        debug!(ascending = self.ascending_order, "Order toggled");
    }

    /// Starts over with a fresh history, keeping the display order.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        *self = Self::with_order(self.ascending_order);
        info!("Game restarted");
    }

    /// Status of the selected step.
    pub fn current_status(&self) -> Status {
        match evaluate(&self.current_board()) {
            WinResult::Draw => Status::Draw,
            WinResult::Win { player, .. } => Status::Winner(player),
            WinResult::NoWinner => Status::NextPlayer(self.next_player()),
        }
    }

    /// Winning line of the selected step, if it is won.
    pub fn highlighted_line(&self) -> Option<[usize; 3]> {
        match evaluate(&self.current_board()) {
            WinResult::Win { line, .. } => Some(line),
            _ => None,
        }
    }

    /// Squares of the selected step paired with their highlight flag.
    pub fn cells(&self) -> [(Square, bool); 9] {
        let board = self.current_board();
        let line = self.highlighted_line();
        std::array::from_fn(|pos| {
            let highlighted = line.is_some_and(|l| l.contains(&pos));
            (board.squares()[pos], highlighted)
        })
    }

    /// Move list in display order.
    pub fn move_list(&self) -> Vec<MoveListItem> {
        let mut items: Vec<_> = self
            .history
            .iter()
            .enumerate()
            .map(|(step, entry)| MoveListItem {
                step,
                label: entry.label(step),
                selected: step == self.selected_step,
            })
            .collect();
        if !self.ascending_order {
            items.reverse();
        }
        items
    }

    /// Board at the selected step.
    pub fn current_board(&self) -> Board {
        *self.selected_entry().board()
    }

    /// History entry at the selected step.
    pub fn selected_entry(&self) -> &HistoryEntry {
        // selected_step is checked by jump_to and on deserialization.
        &self.history.entries()[self.selected_step]
    }

    /// Player to move from the selected step.
    pub fn next_player(&self) -> Player {
        Player::for_step(self.selected_step)
    }

    /// Full history, in play order.
    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    /// Index of the displayed step.
    pub fn selected_step(&self) -> usize {
        self.selected_step
    }

    /// Whether the move list is shown oldest-first.
    pub fn ascending_order(&self) -> bool {
        self.ascending_order
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}
