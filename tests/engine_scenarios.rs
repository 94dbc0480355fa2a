//! Rule scenarios driven through the public action protocol.

mod common;

use common::{new_engine, replay, ANNA, BEN};
use morris_engine::{
    Action, ActionError, Cell, Color, EndReason, ErrorKind, Outcome, Phase, Point, Seat, Seats,
    Status,
};

/// Eighteen placements, no mill along the way.
const QUIET_SETTING: &str =
    "WP12 BP14 WP1 BP9 WP20 BP19 WP16 BP11 WP23 BP7 WP15 BP5 WP17 BP4 WP8 BP2 WP0 BP22";

/// White mills repeatedly and grinds Black down to four pieces in the
/// moving phase. Black to move.
const BLACK_DOWN_TO_FOUR: &str = "WP4 BP10 WP17 BP2 WP18 BP13 WP16 WC2 BP7 WP11 BP5 WP22 BP12 \
     WP23 WC12 BP9 WP3 BP19 WP2 WC19 BP12 WM18-19 WC12 BM9-8 WM19-18 WC10";

/// Continues the game above: Black down to three pieces (5, 7, 8), Black to move.
const BLACK_DOWN_TO_THREE: &str = "BM13-21 WM18-19 WC21";

/// Black fills the outer ring and 14; White seals every exit.
const BLACK_BOXED_IN: &str = "WP19 BP5 WP10 BP7 WP9 BP3 WP18 BP6 WP1 BP4 BC10 WP11 BP0 BC9 \
     WP9 BP2 BC1 WP15 BP1 BC19 WP13 BP14";

fn p(index: u8) -> Point {
    Point::new(index).unwrap()
}

#[test]
fn test_first_placement() {
    let mut engine = new_engine();

    let outcome = engine.handle_action(ANNA, Action::Place { index: 0 }).unwrap();

    assert_eq!(outcome, Outcome::TurnPassed);
    assert_eq!(engine.board().occupant(p(0)), Cell::Occupied(Color::White));
    assert_eq!(engine.player(Seat::A).unplaced_pieces, 8);
    assert_eq!(engine.player(Seat::A).pieces_on_board, 1);
    assert!(!engine.is_waiting_for_capture());
    assert_eq!(engine.turn_player(), BEN);
}

#[test]
fn test_closing_a_mill_keeps_the_turn() {
    let mut engine = new_engine();
    replay(&mut engine, "WP0 BP8 WP1 BP13");

    let outcome = engine.handle_action(ANNA, Action::Place { index: 2 }).unwrap();

    assert_eq!(outcome, Outcome::CaptureRequired);
    assert!(engine.is_waiting_for_capture());
    assert_eq!(engine.turn_player(), ANNA);
    assert_eq!(engine.player(Seat::B).pieces_on_board, 2);
    assert_eq!(engine.board().count(Color::Black), 2);
}

#[test]
fn test_only_capture_while_pending() {
    let mut engine = new_engine();
    replay(&mut engine, "WP0 BP8 WP1 BP13 WP2");

    let err = engine.handle_action(ANNA, Action::Place { index: 5 }).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Phase);
    let err = engine.handle_action(BEN, Action::Capture { index: 0 }).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Turn);
    let err = engine.handle_action(ANNA, Action::Capture { index: 5 }).unwrap_err();
    assert_eq!(err, ActionError::NotOpponentPiece(p(5)));
}

#[test]
fn test_milled_piece_protected_while_loose_piece_exists() {
    let mut engine = new_engine();
    // Black closes 8-9-10 and takes 20; White then closes 0-1-2 while Black
    // still has a loose piece on 12.
    replay(&mut engine, "WP0 BP8 WP1 BP9 WP20 BP10 BC20 WP3 BP12 WP2");
    assert!(engine.is_waiting_for_capture());

    let before = engine.snapshot();
    let err = engine.handle_action(ANNA, Action::Capture { index: 9 }).unwrap_err();
    assert_eq!(err, ActionError::Protected(p(9)));
    assert_eq!(err.kind(), ErrorKind::Protection);
    assert_eq!(engine.snapshot(), before);

    assert_eq!(
        engine.handle_action(ANNA, Action::Capture { index: 12 }),
        Ok(Outcome::TurnPassed)
    );
}

#[test]
fn test_milled_piece_capturable_when_all_are_milled() {
    let mut engine = new_engine();
    replay(&mut engine, "WP0 BP8 WP1 BP9 WP20 BP10 BC20 WP2");
    assert!(engine.board().all_pieces_in_mills(Color::Black));

    assert_eq!(
        engine.handle_action(ANNA, Action::Capture { index: 9 }),
        Ok(Outcome::TurnPassed)
    );
    assert!(engine.board().occupant(p(9)).is_empty());
    assert_eq!(engine.player(Seat::B).pieces_on_board, 2);
    // Still placing: losing pieces below three is not checked yet.
    assert_eq!(engine.status(), Status::Active);
}

#[test]
fn test_phase_changes_on_last_placement() {
    let mut engine = new_engine();
    let steps: Vec<&str> = QUIET_SETTING.split_whitespace().collect();
    replay(&mut engine, &steps[..17].join(" "));
    assert_eq!(engine.phase(), Phase::Setting);
    assert_eq!(engine.player(Seat::A).unplaced_pieces, 0);
    assert_eq!(engine.player(Seat::B).unplaced_pieces, 1);

    replay(&mut engine, steps[17]);
    assert_eq!(engine.phase(), Phase::Moving);
    assert_eq!(engine.turn_player(), ANNA);

    let err = engine.handle_action(ANNA, Action::Place { index: 3 }).unwrap_err();
    assert_eq!(err, ActionError::MovementPhase { attempted: morris_engine::ActionKind::Place });
}

#[test]
fn test_phase_changes_after_capture_on_last_placement() {
    let mut engine = new_engine();
    let outcome = replay(
        &mut engine,
        "WP7 BP19 WP18 BP4 WP13 BP20 WP2 BP0 WP23 BP8 WP14 BP6 WP9 BP16 WP21 BP22 WP17 BP5",
    );
    assert_eq!(outcome, Some(Outcome::CaptureRequired));
    assert_eq!(engine.phase(), Phase::Setting);

    replay(&mut engine, "BC7");
    assert_eq!(engine.phase(), Phase::Moving);
    assert_eq!(engine.turn_player(), ANNA);
    assert_eq!(engine.player(Seat::A).pieces_on_board, 8);
}

#[test]
fn test_sliding_requires_adjacency() {
    let mut engine = new_engine();
    replay(&mut engine, QUIET_SETTING);

    let err = engine.handle_action(ANNA, Action::Move { from: 0, to: 3 }).unwrap_err();
    assert_eq!(err, ActionError::NotAdjacent { from: p(0), to: p(3) });
    assert_eq!(err.kind(), ErrorKind::Adjacency);

    let err = engine.handle_action(ANNA, Action::Move { from: 14, to: 13 }).unwrap_err();
    assert_eq!(err, ActionError::NotOwnPiece(p(14)));
    let err = engine.handle_action(ANNA, Action::Move { from: 0, to: 1 }).unwrap_err();
    assert_eq!(err, ActionError::Occupied(p(1)));
}

#[test]
fn test_four_pieces_cannot_fly() {
    let mut engine = new_engine();
    replay(&mut engine, BLACK_DOWN_TO_FOUR);
    assert_eq!(engine.turn_player(), BEN);
    assert_eq!(engine.player(Seat::B).pieces_on_board, 4);
    assert!(!engine.is_flying(Seat::B));

    let err = engine.handle_action(BEN, Action::Move { from: 8, to: 20 }).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Adjacency);
}

#[test]
fn test_three_pieces_fly() {
    let mut engine = new_engine();
    replay(&mut engine, BLACK_DOWN_TO_FOUR);
    replay(&mut engine, BLACK_DOWN_TO_THREE);
    assert_eq!(engine.turn_player(), BEN);
    assert_eq!(engine.player(Seat::B).pieces_on_board, 3);
    assert!(engine.is_flying(Seat::B));
    assert!(!engine.is_flying(Seat::A));

    let outcome = engine.handle_action(BEN, Action::Move { from: 8, to: 20 }).unwrap();
    assert_eq!(outcome, Outcome::TurnPassed);
    assert_eq!(engine.board().occupant(p(20)), Cell::Occupied(Color::Black));
    assert!(engine.board().occupant(p(8)).is_empty());
}

#[test]
fn test_capture_below_three_ends_game() {
    let mut engine = new_engine();
    replay(&mut engine, BLACK_DOWN_TO_FOUR);
    replay(&mut engine, BLACK_DOWN_TO_THREE);
    let outcome = replay(&mut engine, "BM7-0 WM19-18 WC0").unwrap();

    let Outcome::GameOver(result) = outcome else {
        panic!("expected game over, got {outcome:?}");
    };
    assert_eq!(result.winner, Some(ANNA));
    assert_eq!(result.reason, EndReason::InsufficientPieces);
    assert_eq!(engine.status(), Status::GameOver);
    assert_eq!(engine.phase(), Phase::GameOver);
    assert_eq!(engine.end_reason().map(|r| r.to_string()), Some("insufficient pieces".into()));
    assert_eq!(engine.player(Seat::B).pieces_on_board, 2);
    assert_eq!(engine.match_score(), &Seats::new(1, 0));
}

#[test]
fn test_blockade_ends_game() {
    let mut engine = new_engine();
    replay(&mut engine, BLACK_BOXED_IN);
    assert_eq!(engine.phase(), Phase::Moving);
    assert_eq!(engine.player(Seat::B).pieces_on_board, 9);

    let outcome = engine.handle_action(ANNA, Action::Move { from: 18, to: 19 }).unwrap();

    let Outcome::GameOver(result) = outcome else {
        panic!("expected game over, got {outcome:?}");
    };
    assert_eq!(result.winner, Some(ANNA));
    assert_eq!(result.reason, EndReason::Blockade);
    // Decided before the turn passes: Anna still holds it.
    assert_eq!(engine.turn_player(), ANNA);
    assert!(!engine.board().has_legal_moves(Color::Black, 3));
}

#[test]
fn test_game_over_blocks_everything_but_restart() {
    let mut engine = new_engine();
    replay(&mut engine, BLACK_BOXED_IN);
    replay(&mut engine, "WM18-19");

    let frozen = engine.snapshot();
    for (player, action) in [
        (ANNA, Action::Move { from: 19, to: 18 }),
        (BEN, Action::Move { from: 0, to: 8 }),
        (BEN, Action::Place { index: 20 }),
    ] {
        assert_eq!(engine.handle_action(player, action), Err(ActionError::GameOver));
    }
    assert_eq!(engine.snapshot(), frozen);
}

#[test]
fn test_restart_resets_and_alternates() {
    let mut engine = new_engine();
    replay(&mut engine, BLACK_BOXED_IN);
    replay(&mut engine, "WM18-19");
    assert_eq!(engine.turn_player(), ANNA);

    engine.restart().unwrap();

    let snapshot = engine.snapshot();
    assert!(snapshot.board.iter().all(|c| c.is_empty()));
    for (_, rec) in snapshot.players.iter() {
        assert_eq!((rec.unplaced_pieces, rec.pieces_on_board), (9, 0));
    }
    assert_eq!(snapshot.phase, Phase::Setting);
    assert_eq!(snapshot.status, Status::Active);
    assert_eq!(snapshot.winner, None);
    assert_eq!(snapshot.end_reason, None);
    assert!(!snapshot.waiting_for_capture);
    assert_eq!(snapshot.turn, BEN);
    assert_eq!(snapshot.score_of(ANNA), Some(1));
    assert_eq!(snapshot.score_of(BEN), Some(0));

    // Colors stay with the seats; Ben opens with Black.
    engine.handle_action(BEN, Action::Place { index: 0 }).unwrap();
    assert_eq!(engine.board().occupant(p(0)), Cell::Occupied(Color::Black));
}

#[test]
fn test_restart_of_running_game_rejected() {
    let mut engine = new_engine();
    replay(&mut engine, "WP0 BP1");
    let before = engine.snapshot();

    assert_eq!(engine.restart(), Err(ActionError::StillActive));
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_rejections_leave_state_untouched() {
    let mut engine = new_engine();
    replay(&mut engine, "WP0 BP8 WP1 BP9 WP20 BP10 BC20 WP3 BP12 WP2");
    let before = engine.snapshot();

    for (player, action) in [
        (BEN, Action::Capture { index: 0 }),
        (ANNA, Action::Capture { index: 30 }),
        (ANNA, Action::Capture { index: 9 }),
        (ANNA, Action::Place { index: 4 }),
        (ANNA, Action::Move { from: 0, to: 7 }),
    ] {
        assert!(engine.handle_action(player, action).is_err());
        assert_eq!(engine.snapshot(), before);
    }
}

#[test]
fn test_history_tracks_applied_actions() {
    let mut engine = new_engine();
    replay(&mut engine, "WP0 BP8");
    let _ = engine.handle_action(BEN, Action::Place { index: 2 });

    let history: Vec<_> = engine.history().iter().map(|r| (r.player, r.action, r.sequence)).collect();
    assert_eq!(
        history,
        vec![
            (ANNA, Action::Place { index: 0 }, 0),
            (BEN, Action::Place { index: 8 }, 1),
        ]
    );
}
