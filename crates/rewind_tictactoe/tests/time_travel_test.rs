//! Tests for game sessions with time travel.

use rewind_tictactoe::{
    GameController, GameError, MoveOutcome, Player, RejectReason, Square, Status, WinResult,
    evaluate,
};

fn play_all(game: &mut GameController, cells: &[usize]) {
    for &cell in cells {
        let outcome = game.play_move(cell).expect("Valid cell");
        assert!(outcome.is_played(), "Move at {} was rejected", cell);
    }
}

#[test]
fn test_diagonal_win_scenario() {
    let mut game = GameController::new();
    play_all(&mut game, &[0, 1, 4, 2, 8]);

    assert_eq!(game.current_status(), Status::Winner(Player::X));
    assert_eq!(game.highlighted_line(), Some([0, 4, 8]));
    assert_eq!(
        evaluate(&game.current_board()),
        WinResult::Win {
            player: Player::X,
            line: [0, 4, 8]
        }
    );
}

#[test]
fn test_play_on_decided_game_is_noop() {
    let mut game = GameController::new();
    play_all(&mut game, &[0, 1, 4, 2, 8]);
    let before = game.clone();

    for cell in [3, 5, 6, 7, 0] {
        assert_eq!(
            game.play_move(cell),
            Ok(MoveOutcome::Rejected(RejectReason::GameDecided))
        );
    }
    assert_eq!(game, before);
}

#[test]
fn test_dead_board_draw_fires_before_full() {
    // X:0,1,5,6 O:2,3,4,7 leaves cell 8 empty with every line dead.
    let mut game = GameController::new();
    play_all(&mut game, &[0, 2, 1, 3, 5, 4, 6]);
    assert_eq!(game.current_status(), Status::NextPlayer(Player::O));

    play_all(&mut game, &[7]);
    assert_eq!(game.current_status(), Status::Draw);
    assert_eq!(game.highlighted_line(), None);
    assert!(game.current_board().is_empty(8));

    let before = game.clone();
    assert_eq!(
        game.play_move(8),
        Ok(MoveOutcome::Rejected(RejectReason::GameDecided))
    );
    assert_eq!(game, before);
}

#[test]
fn test_full_board_without_line_is_draw() {
    let board = [0, 1, 5, 6, 8]
        .into_iter()
        .fold(rewind_tictactoe::Board::new(), |b, pos| {
            b.with_mark(pos, Player::X).unwrap()
        });
    let board = [2, 3, 4, 7]
        .into_iter()
        .fold(board, |b, pos| b.with_mark(pos, Player::O).unwrap());
    assert_eq!(evaluate(&board), WinResult::Draw);
}

#[test]
fn test_occupied_cells_match_step() {
    let mut game = GameController::new();
    play_all(&mut game, &[4, 0, 8, 2, 1, 7]);
    for (step, entry) in game.history().iter().enumerate() {
        assert_eq!(entry.board().occupied(), step);
    }
}

#[test]
fn test_each_entry_adds_one_mark() {
    let mut game = GameController::new();
    play_all(&mut game, &[4, 0, 8, 2]);
    let entries = game.history().entries();
    for pair in entries.windows(2) {
        let played = pair[1].played().expect("Later entries carry a move");
        let cell = played.position.to_index();
        assert_eq!(pair[0].board().get(cell), Some(Square::Empty));
        assert_eq!(pair[1].board().get(cell), Some(Square::Occupied(played.player)));
        let changed = (0..9)
            .filter(|&pos| pair[0].board().get(pos) != pair[1].board().get(pos))
            .count();
        assert_eq!(changed, 1);
    }
}

#[test]
fn test_jump_then_play_truncates_future() {
    let mut game = GameController::new();
    play_all(&mut game, &[4, 0, 8, 2, 6]);
    assert_eq!(game.history().len(), 6);
    let abandoned = *game.history().at(3).unwrap().board();

    game.jump_to(2).unwrap();
    assert_eq!(game.history().len(), 6);
    assert_eq!(game.current_status(), Status::NextPlayer(Player::X));

    let outcome = game.play_move(1).unwrap();
    assert!(outcome.is_played());
    assert_eq!(game.history().len(), 2 + 2);
    assert_eq!(game.selected_step(), 3);
    assert_ne!(game.history().at(3).unwrap().board(), &abandoned);
    assert_eq!(
        game.jump_to(4),
        Err(GameError::IndexOutOfRange { step: 4, len: 4 })
    );
}

#[test]
fn test_jump_back_reopens_decided_game() {
    let mut game = GameController::new();
    play_all(&mut game, &[0, 1, 4, 2, 8]);
    game.jump_to(4).unwrap();
    assert_eq!(game.current_status(), Status::NextPlayer(Player::X));
    assert_eq!(game.highlighted_line(), None);

    game.jump_to(5).unwrap();
    assert_eq!(game.current_status(), Status::Winner(Player::X));
}

#[test]
fn test_repeated_jump_is_idempotent() {
    let mut game = GameController::new();
    play_all(&mut game, &[0, 3, 1, 4, 2]);
    game.jump_to(5).unwrap();
    let once = game.clone();
    game.jump_to(5).unwrap();
    assert_eq!(game, once);
    assert_eq!(game.current_status(), game.current_status());
    assert_eq!(game.highlighted_line(), game.highlighted_line());
    assert_eq!(game.highlighted_line(), Some([0, 1, 2]));
}

#[test]
fn test_rejected_move_on_past_step_keeps_future() {
    let mut game = GameController::new();
    play_all(&mut game, &[4, 0, 8]);
    game.jump_to(1).unwrap();
    assert_eq!(
        game.play_move(4),
        Ok(MoveOutcome::Rejected(RejectReason::CellOccupied(
            rewind_tictactoe::Position::Center
        )))
    );
    assert_eq!(game.history().len(), 4);
    assert_eq!(game.selected_step(), 1);
}

#[test]
fn test_toggle_order_twice_restores_state() {
    let mut game = GameController::new();
    play_all(&mut game, &[4, 0]);
    let before = game.clone();

    game.toggle_order();
    assert!(!game.ascending_order());
    assert_eq!(game.history(), before.history());
    assert_eq!(game.selected_step(), before.selected_step());

    game.toggle_order();
    assert_eq!(game, before);
}

#[test]
fn test_move_list_order_and_labels() {
    let mut game = GameController::new();
    play_all(&mut game, &[4, 0]);
    game.jump_to(1).unwrap();

    let labels: Vec<_> = game.move_list().into_iter().map(|i| i.label).collect();
    assert_eq!(
        labels,
        [
            "Go to game start",
            "Go to move #1 - X played (1,1)",
            "Go to move #2 - O played (0,0)",
        ]
    );

    game.toggle_order();
    let items = game.move_list();
    let steps: Vec<_> = items.iter().map(|i| i.step).collect();
    assert_eq!(steps, [2, 1, 0]);
    assert!(items[1].selected);
    assert!(!items[0].selected);
}

#[test]
fn test_invalid_indices_are_errors() {
    let mut game = GameController::new();
    assert_eq!(game.play_move(42), Err(GameError::InvalidIndex { index: 42 }));
    assert_eq!(
        game.jump_to(3),
        Err(GameError::IndexOutOfRange { step: 3, len: 1 })
    );
    assert_eq!(game, GameController::new());
}

#[test]
fn test_controller_serializes() {
    let mut game = GameController::new();
    play_all(&mut game, &[4, 0]);
    let json = serde_json::to_string(&game).expect("Serializable");
    let restored: GameController = serde_json::from_str(&json).expect("Deserializable");
    assert_eq!(restored, game);
}

fn restore(value: serde_json::Value) -> Result<GameController, serde_json::Error> {
    serde_json::from_value(value)
}

#[test]
fn test_snapshot_with_selected_step_past_history_is_rejected() {
    let mut value = serde_json::to_value(GameController::new()).expect("Serializable");
    value["selected_step"] = serde_json::json!(7);
    let err = restore(value).expect_err("Step 7 does not exist");
    assert!(err.to_string().contains("Step 7 is out of range"));
}

#[test]
fn test_snapshot_with_empty_history_is_rejected() {
    let mut value = serde_json::to_value(GameController::new()).expect("Serializable");
    value["history"]["entries"] = serde_json::json!([]);
    assert!(restore(value).is_err());
}

#[test]
fn test_snapshot_with_marked_start_is_rejected() {
    let mut value = serde_json::to_value(GameController::new()).expect("Serializable");
    value["history"]["entries"][0]["board"]["squares"][4] = serde_json::json!({ "Occupied": "X" });
    let err = restore(value).expect_err("Game start must be empty");
    assert!(err.to_string().contains("History entry 0"));
}

#[test]
fn test_snapshot_with_unplayable_entries_is_rejected() {
    let mut game = GameController::new();
    play_all(&mut game, &[4, 0]);
    let valid = serde_json::to_value(&game).expect("Serializable");

    // O recorded as opening the game.
    let mut wrong_player = valid.clone();
    wrong_player["history"]["entries"][1]["played"]["player"] = serde_json::json!("O");
    wrong_player["history"]["entries"][1]["board"]["squares"][4] =
        serde_json::json!({ "Occupied": "O" });
    assert!(restore(wrong_player).is_err());

    // Step 1 lands two marks.
    let mut two_marks = valid.clone();
    two_marks["history"]["entries"][1]["board"]["squares"][8] =
        serde_json::json!({ "Occupied": "X" });
    assert!(restore(two_marks).is_err());

    // Later entry without a move.
    let mut missing_move = valid;
    missing_move["history"]["entries"][2]["played"] = serde_json::Value::Null;
    assert!(restore(missing_move).is_err());
}
