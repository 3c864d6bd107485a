//! Tests for best-move and verification reports.

use strictly_solver::{Action, BestMoveReport, Board, Player, Searcher, VerifyReport};

#[test]
fn test_best_move_report_json() {
    let board: Board = "XX./OO./...".parse().unwrap();
    let report = BestMoveReport::compute(&board, &mut Searcher::default()).unwrap();

    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["board"], "XX./OO./...");
    assert_eq!(json["side_to_move"], "X");
    assert_eq!(json["action"]["row"], 0);
    assert_eq!(json["action"]["col"], 2);
    assert_eq!(json["value"], 1);
    assert!(json["stats"]["nodes"].as_u64().unwrap() > 0);
}

#[test]
fn test_best_move_report_rejects_finished_board() {
    let board: Board = "XXX/OO./...".parse().unwrap();
    let err = BestMoveReport::compute(&board, &mut Searcher::default()).unwrap_err();
    assert!(err.to_string().contains("Precondition violated"));
}

#[test]
fn test_report_for_second_player() {
    let board: Board = "X../.../...".parse().unwrap();
    let report = BestMoveReport::compute(&board, &mut Searcher::default()).unwrap();
    assert_eq!(*report.side_to_move(), Player::O);
    assert_eq!(*report.action(), Action::new(1, 1));
    assert!(report.to_string().contains("Value:        +0 (draw with best play)"));
}

#[test]
fn test_verify_from_mid_game_passes() {
    let start: Board = "X../.O./...".parse().unwrap();
    let report = VerifyReport::run(&start, &mut Searcher::default(), None).unwrap();
    assert!(report.passed());
    assert!(*report.boards_checked() > 1);
    assert!(report.to_string().contains("Mismatches:     0"));
}
