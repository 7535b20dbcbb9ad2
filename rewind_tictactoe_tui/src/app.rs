//! Application state and key handling.

use crossterm::event::KeyCode;
use rewind_tictactoe::{GameController, MoveOutcome};
use tracing::{debug, error, instrument};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep running.
    Continue,
    /// Leave the event loop.
    Quit,
}

/// Main application state.
///
/// Owns the game controller and serializes every command into it; the
/// renderer re-reads the controller after each key.
#[derive(Debug)]
pub struct App {
    game: GameController,
    cursor: usize,
    status_message: String,
}

impl App {
    /// Creates a new application.
    pub fn new(game: GameController) -> Self {
        Self {
            game,
            cursor: 4,
            status_message: "Press 1-9 or Enter to play, [ ] to time travel".to_string(),
        }
    }

    /// The game being shown.
    pub fn game(&self) -> &GameController {
        &self.game
    }

    /// Board cell under the cursor (0-8).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Handles one key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char(c @ '1'..='9') => {
                let cell = c as usize - '1' as usize;
                self.cursor = cell;
                self.play(cell);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.play(self.cursor),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Char('[') => {
                if let Some(step) = self.game.selected_step().checked_sub(1) {
                    self.jump(step);
                }
            }
            KeyCode::Char(']') => {
                let step = self.game.selected_step() + 1;
                if step < self.game.history().len() {
                    self.jump(step);
                }
            }
            KeyCode::Char('o') => {
                self.game.toggle_order();
                self.status_message = if self.game.ascending_order() {
                    "Moves listed oldest first".to_string()
                } else {
                    "Moves listed newest first".to_string()
                };
            }
            KeyCode::Char('r') => self.restart(),
            other => debug!(?other, "Unbound key"),
        }
        Action::Continue
    }

    /// Restarts the game.
    pub fn restart(&mut self) {
        debug!("Restarting game");
        self.game.restart();
        self.status_message = "Game restarted. Player X's turn.".to_string();
    }

    fn play(&mut self, cell: usize) {
        self.status_message = match self.game.play_move(cell) {
            Ok(MoveOutcome::Played(played)) => played.to_string(),
            Ok(MoveOutcome::Rejected(reason)) => reason.to_string(),
            Err(e) => {
                error!(error = %e, "Move failed");
                format!("Move error: {}", e)
            }
        };
    }

    fn jump(&mut self, step: usize) {
        self.status_message = match self.game.jump_to(step) {
            Ok(()) => self.game.selected_entry().label(step),
            Err(e) => {
                error!(error = %e, "Jump failed");
                format!("Jump error: {}", e)
            }
        };
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let row = (self.cursor / 3) as isize + d_row;
        let col = (self.cursor % 3) as isize + d_col;
        if (0..3).contains(&row) && (0..3).contains(&col) {
            self.cursor = (row * 3 + col) as usize;
        }
    }
}
