//! Engine scenarios through the public tick API

use blockfall::core::{MemoryHighScoreStore, Piece, Session};
use blockfall::engine::{logic, tick, Settle};
use blockfall::types::{ColorId, Intent, Phase, ShapeKind, GRID_COLS};

fn started(seed: u32) -> (Session, MemoryHighScoreStore) {
    let mut session = Session::new(seed);
    let mut store = MemoryHighScoreStore::new();
    let mut intent = Intent {
        hard_drop: true,
        ..Intent::default()
    };
    tick(&mut session, &mut intent, 0, &mut store);
    assert_eq!(session.phase, Phase::Playing);
    (session, store)
}

/// Put a piece of `kind` on the session, rotated `turns` times, then moved by (dx, dy)
fn place(session: &mut Session, kind: ShapeKind, turns: u8, dx: i8, dy: i8) {
    let mut piece = Piece::new(kind, ColorId::TBlue);
    for _ in 0..turns {
        piece.rotate();
    }
    piece.translate(dx, dy);
    piece.backup();
    piece.refresh_drop_distance(&session.grid);
    session.active = Some(piece);
}

fn hard_drop(session: &mut Session, store: &mut MemoryHighScoreStore) {
    let mut intent = Intent {
        hard_drop: true,
        ..Intent::default()
    };
    tick(session, &mut intent, 0, store);
}

#[test]
fn test_four_i_pieces_clear_bottom_row() {
    let (mut session, mut store) = started(11);

    // Horizontal I: after one turn the blocks sit at x -1..=2 on row 2.
    place(&mut session, ShapeKind::I, 1, 1, -2);
    hard_drop(&mut session, &mut store);
    place(&mut session, ShapeKind::I, 1, 5, -2);
    hard_drop(&mut session, &mut store);

    // Two vertical I pieces in the last two columns.
    place(&mut session, ShapeKind::I, 0, 8, 0);
    hard_drop(&mut session, &mut store);
    assert_eq!(session.score, 0);
    assert_eq!(session.grid.occupied_count(), 12);
    assert!(!session.grid.is_row_full(19));

    place(&mut session, ShapeKind::I, 0, 9, 0);
    hard_drop(&mut session, &mut store);

    assert_eq!(session.score, 1);
    assert_eq!(session.grid.occupied_count(), 16 - GRID_COLS as usize);
    // Former rows 16..=18 of the vertical pieces now sit at 17..=19.
    for y in 17..=19 {
        assert!(session.grid.is_occupied(8, y));
        assert!(session.grid.is_occupied(9, y));
    }
    assert!(!session.grid.is_occupied(8, 16));
    // The new bottom row is the former second-from-bottom row.
    for x in 0..8 {
        assert!(!session.grid.is_occupied(x, 19));
    }
    assert_eq!(session.phase, Phase::Playing);

    // High score follows on the next tick.
    tick(&mut session, &mut Intent::default(), 0, &mut store);
    assert_eq!(session.high_score, 1);
    assert_eq!(store.value(), Some(1));
}

#[test]
fn test_rotation_at_left_wall_is_kicked_right() {
    let (mut session, mut store) = started(3);
    // T with its stem on column 0; rotating puts a block at column -1.
    place(&mut session, ShapeKind::T, 0, 0, 5);

    let mut intent = Intent {
        rotate: true,
        ..Intent::default()
    };
    tick(&mut session, &mut intent, 0, &mut store);

    let mut blocks = *session.active.unwrap().blocks();
    blocks.sort();
    assert_eq!(blocks, [(0, 6), (1, 6), (1, 7), (2, 6)]);
}

#[test]
fn test_rotation_rolls_back_when_kick_is_blocked() {
    let (mut session, mut store) = started(3);
    place(&mut session, ShapeKind::T, 0, 0, 5);
    session.grid.set(2, 6, Some(ColorId::TRed));
    let before = session.active.unwrap();

    let mut intent = Intent {
        rotate: true,
        ..Intent::default()
    };
    tick(&mut session, &mut intent, 0, &mut store);

    let after = session.active.unwrap();
    assert_eq!(after.blocks(), before.blocks());
    assert_eq!(session.grid.occupied_count(), 1);
}

#[test]
fn test_lock_at_top_row_ends_session() {
    let (mut session, mut store) = started(8);
    for y in 2..20 {
        session.grid.set(0, y, Some(ColorId::TGreen));
    }
    // A full row waiting to be cleared must stay untouched by a top-out.
    for x in 1..GRID_COLS as i8 {
        session.grid.set(x, 19, Some(ColorId::TGreen));
    }
    let occupied = session.grid.occupied_count();
    place(&mut session, ShapeKind::O, 0, 0, 0);

    hard_drop(&mut session, &mut store);

    assert_eq!(session.phase, Phase::GameOver);
    assert_eq!(session.score, 0);
    assert_eq!(session.grid.occupied_count(), occupied);
    assert!(session.grid.is_row_full(19));
}

#[test]
fn test_game_over_ignores_movement_until_restart() {
    let (mut session, mut store) = started(8);
    session.phase = Phase::GameOver;
    let active = session.active;

    let mut intent = Intent {
        move_x: 1,
        rotate: true,
        pause: true,
        ..Intent::default()
    };
    tick(&mut session, &mut intent, 5_000, &mut store);
    assert_eq!(session.active, active);
    assert!(intent.is_idle());

    hard_drop(&mut session, &mut store);
    assert_eq!(session.phase, Phase::Playing);
}

#[test]
fn test_each_lock_adds_cleared_rows_to_score() {
    let (mut session, _store) = started(21);
    for y in 17..20 {
        for x in 0..GRID_COLS as i8 {
            if x != 4 {
                session.grid.set(x, y, Some(ColorId::TRed));
            }
        }
    }
    // Vertical I into the 3-deep well: clears three rows at once.
    place(&mut session, ShapeKind::I, 0, 4, 0);
    logic::hard_drop(&mut session);
    assert_eq!(logic::settle(&mut session), Settle::Locked { rows_cleared: 3 });
    assert_eq!(session.score, 3);
    assert_eq!(session.grid.occupied_count(), 1);
    assert!(session.grid.is_occupied(4, 19));
}

#[test]
fn test_gravity_speeds_up_with_level() {
    let (mut session, mut store) = started(4);
    place(&mut session, ShapeKind::O, 0, 4, 2);
    session.level = 5;
    session.level_threshold = 25;

    tick(&mut session, &mut Intent::default(), 201, &mut store);
    assert_eq!(session.active.unwrap().blocks()[0], (4, 3));
}

#[test]
fn test_pause_freezes_gravity() {
    let (mut session, mut store) = started(4);
    place(&mut session, ShapeKind::O, 0, 4, 2);

    let mut intent = Intent {
        pause: true,
        ..Intent::default()
    };
    tick(&mut session, &mut intent, 0, &mut store);
    assert_eq!(session.phase, Phase::Pause);

    for _ in 0..10 {
        tick(&mut session, &mut Intent::default(), 500, &mut store);
    }
    assert_eq!(session.active.unwrap().blocks()[0], (4, 2));
}

#[test]
fn test_score_from_last_lock_survives_pause() {
    let (mut session, mut store) = started(21);
    for x in 0..GRID_COLS as i8 {
        if x != 4 {
            session.grid.set(x, 19, Some(ColorId::TRed));
        }
    }
    place(&mut session, ShapeKind::I, 0, 4, 0);
    hard_drop(&mut session, &mut store);
    assert_eq!(session.score, 1);

    // Pausing right after the clear must not hold back the save.
    let mut intent = Intent {
        pause: true,
        ..Intent::default()
    };
    tick(&mut session, &mut intent, 0, &mut store);
    assert_eq!(session.phase, Phase::Pause);
    assert_eq!(store.value(), Some(1));
}
