//! Plain-text rendering for the `replay` subcommand.

use rewind_tictactoe::GameController;

/// Renders the selected board, status and move list as text.
///
/// The selected move-list entry is marked with `>`; winning cells are listed
/// after the status line.
pub fn render_text(game: &GameController) -> String {
    let mut out = game.current_board().display();
    out.push_str("\n\n");
    out.push_str(&game.current_status().to_string());
    out.push('\n');
    if let Some(line) = game.highlighted_line() {
        out.push_str(&format!("Winning line: {:?}\n", line));
    }
    let order = if game.ascending_order() {
        "ascending"
    } else {
        "descending"
    };
    out.push_str(&format!("\nMoves ({}):\n", order));
    for item in game.move_list() {
        let marker = if item.selected { '>' } else { ' ' };
        out.push_str(&format!("{} {}\n", marker, item.label));
    }
    out
}
