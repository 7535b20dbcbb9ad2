//! Move history with time travel.
//!
//! History is an ordered list of immutable board snapshots. Entry 0 is always
//! the empty board, and each later entry adds exactly one mark to its
//! predecessor. The only way entries disappear is [`GameHistory::truncate`],
//! used when a move is played from an earlier step.

use crate::error::GameError;
use crate::position::{Coordinates, Position};
use crate::rules::evaluate;
use crate::types::{Board, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A move: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player placed their mark.
    pub position: Position,
}

impl Move {
    /// Row and column of the played cell.
    pub fn coordinates(&self) -> Coordinates {
        self.position.coordinates()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} played {}", self.player, self.coordinates())
    }
}

/// One point in the game: a snapshot and the move that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct HistoryEntry {
    /// Board after the move.
    board: Board,
    /// The move that produced this board; `None` for the game start.
    played: Option<Move>,
}

impl HistoryEntry {
    /// The game-start entry.
    pub fn start() -> Self {
        Self {
            board: Board::new(),
            played: None,
        }
    }

    /// Move-list text for this entry when it sits at `step`.
    pub fn label(&self, step: usize) -> String {
        match self.played {
            Some(mv) if step > 0 => format!("Go to move #{} - {}", step, mv),
            _ => "Go to game start".to_string(),
        }
    }
}

/// Ordered, append-only list of history entries.
///
/// Deserialized histories are replayed entry by entry and rejected unless
/// they start from the empty board and each entry adds one mark for the
/// player of the preceding step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordedHistory")]
pub struct GameHistory {
    entries: Vec<HistoryEntry>,
}

/// Unchecked wire form of [`GameHistory`].
#[derive(Deserialize)]
struct RecordedHistory {
    entries: Vec<HistoryEntry>,
}

impl TryFrom<RecordedHistory> for GameHistory {
    type Error = GameError;

    fn try_from(recorded: RecordedHistory) -> Result<Self, Self::Error> {
        let entries = recorded.entries;
        if entries.first() != Some(&HistoryEntry::start()) {
            return Err(GameError::InvalidHistory { step: 0 });
        }
        for (offset, pair) in entries.windows(2).enumerate() {
            let step = offset + 1;
            if !follows(&pair[0], &pair[1], step) {
                return Err(GameError::InvalidHistory { step });
            }
        }
        Ok(Self { entries })
    }
}

/// Whether `next`, recorded at `step`, is a legal play from `prev`.
fn follows(prev: &HistoryEntry, next: &HistoryEntry, step: usize) -> bool {
    let Some(played) = next.played else {
        return false;
    };
    let cell = played.position.to_index();
    played.player == Player::for_step(step - 1)
        && prev.board.is_empty(cell)
        && !evaluate(&prev.board).is_decided()
        && prev.board.with_mark(cell, played.player) == Ok(next.board)
}

impl GameHistory {
    /// Creates a history holding only the empty board.
    #[instrument]
    pub fn new() -> Self {
        Self {
            entries: vec![HistoryEntry::start()],
        }
    }

    /// Returns the entry at `step`.
    pub fn at(&self, step: usize) -> Result<&HistoryEntry, GameError> {
        self.entries.get(step).ok_or(GameError::IndexOutOfRange {
            step,
            len: self.entries.len(),
        })
    }

    /// Discards every entry after `upto` (inclusive bound is kept).
    #[instrument(skip(self), fields(len = self.entries.len()))]
    pub fn truncate(&mut self, upto: usize) -> Result<(), GameError> {
        if upto >= self.entries.len() {
            return Err(GameError::IndexOutOfRange {
                step: upto,
                len: self.entries.len(),
            });
        }
        let discarded = self.entries.len() - upto - 1;
        if discarded > 0 {
            debug!(discarded, "Discarding abandoned future");
        }
        self.entries.truncate(upto + 1);
        Ok(())
    }

    /// Appends a snapshot and the move that produced it.
    #[instrument(skip(self, board))]
    pub fn append(&mut self, board: Board, played: Move) {
        self.entries.push(HistoryEntry {
            board,
            played: Some(played),
        });
    }

    /// Number of entries, including the game start.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the game-start entry is never removed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry.
    pub fn latest(&self) -> &HistoryEntry {
        // Entry 0 exists on every construction path and survives truncation.
        &self.entries[self.entries.len() - 1]
    }

    /// All entries in play order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Iterates entries in play order.
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }
}

impl Default for GameHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a GameHistory {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(history: &mut GameHistory, pos: Position) {
        let player = Player::for_step(history.len() - 1);
        let board = history
            .latest()
            .board()
            .with_mark(pos.to_index(), player)
            .unwrap();
        history.append(board, Move::new(player, pos));
    }

    #[test]
    fn test_new_history_has_start() {
        let history = GameHistory::new();
        assert_eq!(history.len(), 1);
        assert_eq!(history.at(0).unwrap(), &HistoryEntry::start());
        assert!(history.at(0).unwrap().played().is_none());
    }

    #[test]
    fn test_at_out_of_range() {
        let history = GameHistory::new();
        assert_eq!(
            history.at(1),
            Err(GameError::IndexOutOfRange { step: 1, len: 1 })
        );
    }

    #[test]
    fn test_truncate_keeps_prefix() {
        let mut history = GameHistory::new();
        push(&mut history, Position::Center);
        push(&mut history, Position::TopLeft);
        push(&mut history, Position::BottomRight);
        history.truncate(1).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().played().map(|m| m.position), Some(Position::Center));
    }

    #[test]
    fn test_truncate_out_of_range() {
        let mut history = GameHistory::new();
        assert_eq!(
            history.truncate(3),
            Err(GameError::IndexOutOfRange { step: 3, len: 1 })
        );
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_recorded_history_is_replay_checked() {
        let mut history = GameHistory::new();
        push(&mut history, Position::Center);
        push(&mut history, Position::TopLeft);
        let valid = RecordedHistory {
            entries: history.entries().to_vec(),
        };
        assert_eq!(GameHistory::try_from(valid), Ok(history.clone()));

        let empty = RecordedHistory { entries: vec![] };
        assert_eq!(
            GameHistory::try_from(empty),
            Err(GameError::InvalidHistory { step: 0 })
        );

        // Second move recorded for the wrong player.
        let mut entries = history.entries().to_vec();
        entries[2].played = Some(Move::new(Player::X, Position::TopLeft));
        entries[2].board = entries[1].board.with_mark(0, Player::X).unwrap();
        assert_eq!(
            GameHistory::try_from(RecordedHistory { entries }),
            Err(GameError::InvalidHistory { step: 2 })
        );

        // First move lands two marks.
        let mut entries = history.entries().to_vec();
        entries[1].board = entries[1].board.with_mark(8, Player::O).unwrap();
        assert_eq!(
            GameHistory::try_from(RecordedHistory { entries }),
            Err(GameError::InvalidHistory { step: 1 })
        );
    }

    #[test]
    fn test_labels() {
        let mut history = GameHistory::new();
        push(&mut history, Position::MiddleRight);
        push(&mut history, Position::BottomCenter);
        let labels: Vec<_> = history
            .iter()
            .enumerate()
            .map(|(step, entry)| entry.label(step))
            .collect();
        assert_eq!(
            labels,
            [
                "Go to game start",
                "Go to move #1 - X played (1,2)",
                "Go to move #2 - O played (2,1)",
            ]
        );
    }
}
