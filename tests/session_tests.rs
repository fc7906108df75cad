//! Puzzle session integration tests.
//!
//! These drive the intent-level API the way a front end would and check
//! the recorded history, the solution report and the occupancy invariant.

use pips_engine::core::{Cell, DominoId, Half, Placement, SessionConfig, TrayOrientation};
use pips_engine::engine::PlacementRejected;
use pips_engine::history::Action;
use pips_engine::puzzle::PuzzleDefinition;
use pips_engine::session::PuzzleSession;

fn id(name: &str) -> DominoId {
    name.parse().unwrap()
}

fn at(r0: i32, c0: i32, r1: i32, c1: i32) -> Placement {
    Placement::new(Cell::new(r0, c0), Cell::new(r1, c1))
}

/// 6×6 puzzle with 18 dominos, one region over the top-left pair.
fn six_by_six() -> PuzzleSession {
    let names = [
        "00", "01", "02", "03", "04", "05", "06", "11", "12", "13", "14", "15", "16", "22", "23",
        "24", "25", "26",
    ];
    let def = PuzzleDefinition {
        width: 6,
        height: 6,
        dominos: names.iter().map(|s| s.to_string()).collect(),
        starting_dominos: vec![],
        blocked: vec![],
        regions: vec![serde_json::from_str(
            r#"{ "id": "corner", "rule": {"op": "=", "value": 5}, "cells": [{"row":0,"col":0},{"row":0,"col":1}] }"#,
        )
        .unwrap()],
    };
    PuzzleSession::from_definition(&def).unwrap()
}

fn kinds(session: &PuzzleSession) -> Vec<&'static str> {
    session.history().undo_actions().map(Action::kind).collect()
}

// =============================================================================
// Placement Intents
// =============================================================================

/// Placing "23" at (0,0)-(0,1) covers the corner region with 2 + 3.
#[test]
fn test_place_satisfies_region() {
    let mut session = six_by_six();
    session.place(id("23"), Cell::new(0, 0), Cell::new(0, 1)).unwrap();

    let report = session.check_solution();
    assert_eq!(report.regions[0].current_value, 5);
    assert!(report.regions[0].satisfied);
    assert!(!report.all_placed);
    assert!(!report.solved);
}

/// Rejected intents record nothing and change nothing.
#[test]
fn test_rejected_place_records_nothing() {
    let mut session = six_by_six();
    session.place(id("23"), Cell::new(0, 0), Cell::new(0, 1)).unwrap();
    let before = session.board().clone();

    assert_eq!(
        session.place(id("24"), Cell::new(0, 1), Cell::new(0, 2)),
        Err(PlacementRejected::Occupied { cell: Cell::new(0, 1), by: id("23") })
    );
    assert_eq!(session.board(), &before);
    assert_eq!(kinds(&session), ["place"]);
}

/// Return records an entry; undo puts the domino back.
#[test]
fn test_return_and_undo() {
    let mut session = six_by_six();
    session.place(id("12"), Cell::new(3, 3), Cell::new(4, 3)).unwrap();
    assert_eq!(session.return_to_tray(id("12")), Ok(Some(at(3, 3, 4, 3))));
    assert_eq!(kinds(&session), ["place", "return"]);

    assert_eq!(session.undo(), Ok(true));
    assert_eq!(session.board().domino(id("12")).unwrap().placement(), Some(at(3, 3, 4, 3)));
    assert_eq!(session.check_consistency(), Ok(()));
}

/// Undoing a place restores the tray orientation the domino had.
#[test]
fn test_tray_orientation_survives_place_undo() {
    let mut session = six_by_six();
    session.rotate_in_tray(id("05")).unwrap();
    session.rotate_in_tray(id("05")).unwrap();
    session.place(id("05"), Cell::new(5, 0), Cell::new(5, 1)).unwrap();

    session.undo().unwrap();
    assert_eq!(
        session.board().domino(id("05")).unwrap().tray_orientation(),
        TrayOrientation::Deg180
    );
}

// =============================================================================
// Rotation Intents
// =============================================================================

/// Rotate and commit, then an out-of-bounds rotation is rolled back.
#[test]
fn test_rotation_scenario() {
    let mut session = six_by_six();
    session.place(id("23"), Cell::new(0, 0), Cell::new(0, 1)).unwrap();

    assert_eq!(session.rotate(id("23"), Half::First), Ok(at(0, 0, 1, 0)));
    assert_eq!(session.pending_rotation().unwrap().snapshot(), at(0, 0, 0, 1));
    session.commit_rotation().unwrap();
    assert_eq!(session.board().domino(id("23")).unwrap().placement(), Some(at(0, 0, 1, 0)));

    session.rotate(id("23"), Half::First).unwrap();
    assert_eq!(
        session.commit_rotation(),
        Err(PlacementRejected::OutOfBounds(Cell::new(0, -1)))
    );
    assert_eq!(session.board().domino(id("23")).unwrap().placement(), Some(at(0, 0, 1, 0)));
    assert!(session.pending_rotation().is_none());
    assert_eq!(kinds(&session), ["place", "rotate"]);
}

/// A full turn commits as a no-op and records nothing.
#[test]
fn test_full_turn_not_recorded() {
    let mut session = six_by_six();
    session.place(id("23"), Cell::new(2, 2), Cell::new(2, 3)).unwrap();
    for _ in 0..4 {
        session.rotate(id("23"), Half::Second).unwrap();
    }
    let change = session.commit_rotation().unwrap().unwrap();
    assert!(change.is_noop());
    assert_eq!(kinds(&session), ["place"]);
}

/// Cancel keeps the committed geometry.
#[test]
fn test_cancel_rotation() {
    let mut session = six_by_six();
    session.place(id("23"), Cell::new(2, 2), Cell::new(2, 3)).unwrap();
    session.rotate(id("23"), Half::First).unwrap();

    assert_eq!(session.cancel_rotation(), Some(at(2, 2, 2, 3)));
    assert_eq!(session.cancel_rotation(), None);
    assert_eq!(session.displayed_placement(id("23")), Some(at(2, 2, 2, 3)));
}

/// Undo while a rotation is live abandons it, then undoes the last entry.
#[test]
fn test_undo_abandons_live_rotation() {
    let mut session = six_by_six();
    session.place(id("23"), Cell::new(2, 2), Cell::new(2, 3)).unwrap();
    session.rotate(id("23"), Half::First).unwrap();

    assert_eq!(session.undo(), Ok(true));
    assert!(session.pending_rotation().is_none());
    assert_eq!(session.board().domino(id("23")).unwrap().placement(), None);
    assert!(session.history().can_redo());

    assert_eq!(session.redo(), Ok(true));
    assert_eq!(session.board().domino(id("23")).unwrap().placement(), Some(at(2, 2, 2, 3)));
    assert_eq!(session.check_consistency(), Ok(()));
}

/// Redo while a rotation is live keeps the redo stack.
#[test]
fn test_redo_abandons_live_rotation() {
    let mut session = six_by_six();
    session.place(id("23"), Cell::new(2, 2), Cell::new(2, 3)).unwrap();
    session.place(id("11"), Cell::new(0, 4), Cell::new(0, 5)).unwrap();
    session.undo().unwrap();
    session.rotate(id("23"), Half::First).unwrap();

    assert_eq!(session.redo(), Ok(true));
    assert!(session.pending_rotation().is_none());
    assert_eq!(session.board().domino(id("11")).unwrap().placement(), Some(at(0, 4, 0, 5)));
    assert_eq!(session.board().domino(id("23")).unwrap().placement(), Some(at(2, 2, 2, 3)));
    assert_eq!(kinds(&session), ["place", "place"]);
}

/// Dragging another domino abandons the live rotation.
#[test]
fn test_place_abandons_live_rotation() {
    let mut session = six_by_six();
    session.place(id("23"), Cell::new(2, 2), Cell::new(2, 3)).unwrap();
    session.rotate(id("23"), Half::First).unwrap();

    session.place(id("11"), Cell::new(0, 4), Cell::new(0, 5)).unwrap();
    assert!(session.pending_rotation().is_none());
    assert_eq!(session.board().domino(id("23")).unwrap().placement(), Some(at(2, 2, 2, 3)));
    assert_eq!(kinds(&session), ["place", "place"]);
}

/// Returning the rotating domino sends back its pre-rotation geometry.
#[test]
fn test_return_abandons_live_rotation() {
    let mut session = six_by_six();
    session.place(id("23"), Cell::new(2, 2), Cell::new(2, 3)).unwrap();
    session.rotate(id("23"), Half::Second).unwrap();

    assert_eq!(session.return_to_tray(id("23")), Ok(Some(at(2, 2, 2, 3))));
    assert!(session.pending_rotation().is_none());
    assert_eq!(kinds(&session), ["place", "return"]);
}

// =============================================================================
// History Limits and Solving
// =============================================================================

/// A history limit drops the oldest entries.
#[test]
fn test_history_limit() {
    let json = r#"{ "width": 2, "height": 1, "dominos": ["12"], "regions": [] }"#;
    let def = PuzzleDefinition::from_json(json).unwrap();
    let mut session =
        PuzzleSession::load(&def, SessionConfig::new().with_history_limit(2)).unwrap();

    session.place(id("12"), Cell::new(0, 0), Cell::new(0, 1)).unwrap();
    session.place(id("12"), Cell::new(0, 1), Cell::new(0, 0)).unwrap();
    session.place(id("12"), Cell::new(0, 0), Cell::new(0, 1)).unwrap();

    assert_eq!(session.history().undo_len(), 2);
    assert_eq!(kinds(&session), ["move", "move"]);
}

/// A 2×2 puzzle solved end to end, then unsolved by undo.
#[test]
fn test_solve_and_undo() {
    let json = r#"{
        "width": 2, "height": 2,
        "dominos": ["05", "14"],
        "regions": [
            { "id": "left", "rule": "1", "cells": [{"row":0,"col":0},{"row":1,"col":0}] },
            { "id": "right", "rule": ">8", "cells": [{"row":0,"col":1},{"row":1,"col":1}] }
        ]
    }"#;
    let mut session = PuzzleSession::from_json(json).unwrap();

    // 05 vertical on the left would give 0 + 5: wrong.
    session.place(id("05"), Cell::new(0, 0), Cell::new(0, 1)).unwrap();
    session.place(id("14"), Cell::new(1, 0), Cell::new(1, 1)).unwrap();
    assert!(session.is_solved());
    assert_eq!(session.check_solution().unsatisfied().count(), 0);

    session.undo().unwrap();
    let report = session.check_solution();
    assert!(!report.solved);
    assert!(!report.all_placed);
    assert_eq!(report.regions[0].current_value, 0);
    assert!(!report.regions[0].satisfied);
}

/// Session state serializes for renderers.
#[test]
fn test_state_serializes() {
    let mut session = six_by_six();
    session.place(id("23"), Cell::new(0, 0), Cell::new(0, 1)).unwrap();

    let json = serde_json::to_value(session.state()).unwrap();
    assert!(json.get("board").is_some());
    assert!(json.get("regions").is_some());
    let report = serde_json::to_value(session.check_solution()).unwrap();
    assert_eq!(report["regions"][0]["current_value"], 5);
}
