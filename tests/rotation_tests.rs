//! Two-phase rotation integration tests.

use pips_engine::core::{Board, Cell, Domino, DominoId, Grid, Half, Placement};
use pips_engine::engine::{PlacementRejected, RotationTxn};

fn id(name: &str) -> DominoId {
    name.parse().unwrap()
}

fn at(r0: i32, c0: i32, r1: i32, c1: i32) -> Placement {
    Placement::new(Cell::new(r0, c0), Cell::new(r1, c1))
}

fn placed(rows: usize, cols: usize, pieces: &[(&str, Placement)]) -> Board {
    let dominos = pieces
        .iter()
        .enumerate()
        .map(|(slot, (name, _))| Domino::create(name, slot).unwrap());
    let mut board = Board::new(Grid::new(rows, cols), dominos);
    for (name, p) in pieces {
        board.place_or_move(id(name), *p).unwrap();
    }
    board
}

// =============================================================================
// Geometry
// =============================================================================

/// Four clockwise steps about either half return to the start.
#[test]
fn test_four_steps_is_identity() {
    let start = at(2, 2, 2, 3);
    for pivot in [Half::First, Half::Second] {
        let mut p = start;
        for _ in 0..4 {
            p = p.rotated_clockwise(pivot);
        }
        assert_eq!(p, start);
    }
}

/// Clockwise sweep with row down, col right: right → down → left → up.
#[test]
fn test_clockwise_sweep() {
    let mut p = at(2, 2, 2, 3);
    let mut seen = Vec::new();
    for _ in 0..4 {
        p = p.rotated_clockwise(Half::First);
        seen.push(p.cell(Half::Second));
    }
    assert_eq!(
        seen,
        vec![Cell::new(3, 2), Cell::new(2, 1), Cell::new(1, 2), Cell::new(2, 3)]
    );
}

/// Pivoting on half 1 keeps half 1 fixed and moves half 0.
#[test]
fn test_pivot_second_half() {
    let p = at(2, 2, 2, 3).rotated_clockwise(Half::Second);
    assert_eq!(p.cell(Half::Second), Cell::new(2, 3));
    assert_eq!(p.cell(Half::First), Cell::new(1, 3));
}

// =============================================================================
// Sessions
// =============================================================================

/// The reference scenario: one rotation commits, the next is out of bounds.
#[test]
fn test_rotate_commit_then_out_of_bounds() {
    let mut board = placed(6, 6, &[("23", at(0, 0, 0, 1))]);
    let mut txn = None;

    board.rotate(&mut txn, id("23"), Half::First).unwrap();
    board.commit_rotation(&mut txn).unwrap();
    assert_eq!(board.domino(id("23")).unwrap().placement(), Some(at(0, 0, 1, 0)));

    let candidate = board.rotate(&mut txn, id("23"), Half::First).unwrap();
    assert_eq!(candidate, at(0, 0, 0, -1));
    assert_eq!(
        board.commit_rotation(&mut txn),
        Err(PlacementRejected::OutOfBounds(Cell::new(0, -1)))
    );
    assert_eq!(board.domino(id("23")).unwrap().placement(), Some(at(0, 0, 1, 0)));
    assert_eq!(board.check_consistency(), Ok(()));
}

/// Intermediate orientations may be illegal if the final one is legal.
#[test]
fn test_illegal_intermediate_states() {
    // 45 sits at (1,1)-(1,2); 01 blocks the cell below its pivot.
    let mut board = placed(3, 3, &[("01", at(2, 0, 2, 1)), ("45", at(1, 1, 1, 2))]);
    let mut txn = None;

    // Step 1 lands on (2,1), held by 01.
    assert_eq!(board.rotate(&mut txn, id("45"), Half::First).unwrap(), at(1, 1, 2, 1));
    // Step 2 lands on (1,0), free.
    assert_eq!(board.rotate(&mut txn, id("45"), Half::First).unwrap(), at(1, 1, 1, 0));

    let change = board.commit_rotation(&mut txn).unwrap().unwrap();
    assert_eq!(change.from, Some(at(1, 1, 1, 2)));
    assert_eq!(change.to, at(1, 1, 1, 0));
    assert_eq!(board.check_consistency(), Ok(()));
}

/// A rejected commit leaves no residue at the rejected target.
#[test]
fn test_rejected_commit_is_exact_rollback() {
    let mut board = placed(3, 3, &[("01", at(2, 0, 2, 1)), ("45", at(1, 1, 1, 2))]);
    let before = board.clone();
    let mut txn = None;

    board.rotate(&mut txn, id("45"), Half::First).unwrap();
    let result = board.commit_rotation(&mut txn);

    assert_eq!(
        result,
        Err(PlacementRejected::Occupied { cell: Cell::new(2, 1), by: id("01") })
    );
    assert!(txn.is_none());
    assert_eq!(board, before);
}

/// Only one session at a time.
#[test]
fn test_second_domino_refused_while_session_open() {
    let mut board = placed(3, 3, &[("01", at(0, 0, 0, 1)), ("45", at(2, 0, 2, 1))]);
    let mut txn = None;

    board.rotate(&mut txn, id("01"), Half::First).unwrap();
    assert_eq!(
        board.rotate(&mut txn, id("45"), Half::First),
        Err(PlacementRejected::RotationInProgress(id("01")))
    );
    assert_eq!(txn.map(|t: RotationTxn| t.steps()), Some(1));
}

/// Tray dominos cannot be rotated on the board.
#[test]
fn test_rotate_tray_domino_refused() {
    let mut board = Board::new(Grid::new(2, 2), [Domino::create("01", 0).unwrap()]);
    let mut txn = None;
    assert_eq!(
        board.rotate(&mut txn, id("01"), Half::First),
        Err(PlacementRejected::NotOnBoard(id("01")))
    );
    assert!(txn.is_none());
    assert_eq!(board.commit_rotation(&mut txn), Ok(None));
}

/// Discarding returns the snapshot; the board never moved.
#[test]
fn test_discard() {
    let board = placed(3, 3, &[("01", at(1, 1, 1, 2))]);
    let mut txn = RotationTxn::begin(&board, id("01")).unwrap();
    txn.rotate(Half::Second);
    txn.rotate(Half::Second);

    assert_eq!(txn.discard(), at(1, 1, 1, 2));
    assert_eq!(board.domino(id("01")).unwrap().placement(), Some(at(1, 1, 1, 2)));
}
