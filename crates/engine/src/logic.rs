//! Movement & collision engine
//!
//! Applies one tick of movement intents and elapsed time to the session's active
//! piece. Every discrete change follows the same pattern: back up the blocks,
//! apply the change, test validity, restore on failure. Moves, rotations and
//! drops are corrected independently within a tick.

use log::{debug, info, warn};

use crate::core::{EffectEvent, Grid, Session};
use crate::types::{
    drop_interval_ms, Intent, Phase, EFFECT_STEP_MS, FAST_DROP_INTERVAL_MS, GRID_ROWS,
};

/// What happened to the active piece after a drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// The piece can still fall.
    Falling,
    /// The piece was written into the grid and a new one spawned.
    Locked { rows_cleared: u32 },
    /// The piece rests in the top row; the session is over.
    ToppedOut,
}

/// Summary of one engine tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub locked: bool,
    pub rows_cleared: u32,
    pub topped_out: bool,
}

impl TickReport {
    fn record(&mut self, settle: Settle) {
        match settle {
            Settle::Falling => {}
            Settle::Locked { rows_cleared } => {
                self.locked = true;
                self.rows_cleared += rows_cleared;
            }
            Settle::ToppedOut => self.topped_out = true,
        }
    }
}

/// Run one engine tick
///
/// Does nothing outside [`Phase::Playing`]. Consumes `move_x`, `rotate` and
/// `hard_drop`; reads `fast_drop_held`.
pub fn update(session: &mut Session, intent: &mut Intent, elapsed_ms: u32) -> TickReport {
    let mut report = TickReport::default();
    if session.phase != Phase::Playing || session.active.is_none() {
        return report;
    }

    if intent.move_x != 0 {
        try_shift(session, intent.move_x.signum());
        intent.move_x = 0;
    }

    if intent.rotate {
        try_rotate(session);
        intent.rotate = false;
    }

    if intent.hard_drop {
        intent.hard_drop = false;
        hard_drop(session);
        let settle = settle(session);
        report.record(settle);
        if settle == Settle::ToppedOut {
            return report;
        }
    }

    let interval = if intent.fast_drop_held {
        FAST_DROP_INTERVAL_MS
    } else {
        drop_interval_ms(session.level)
    };
    session.drop_timer_ms = session.drop_timer_ms.saturating_add(elapsed_ms);
    if session.drop_timer_ms > interval {
        session.drop_timer_ms = 0;
        step_down(session);
        let settle = settle(session);
        report.record(settle);
        if settle == Settle::ToppedOut {
            return report;
        }
    }

    step_effects(session, elapsed_ms);
    report
}

/// Move the active piece horizontally, rolling back if the target is blocked
pub fn try_shift(session: &mut Session, dx: i8) -> bool {
    let Session { grid, active, .. } = session;
    let Some(piece) = active.as_mut() else {
        return false;
    };

    piece.shift_x(dx);
    let ok = piece.fits(grid, 0);
    if !ok {
        piece.restore();
    }
    piece.refresh_drop_distance(grid);
    ok
}

/// Rotate the active piece with a single horizontal wall kick
///
/// If the kicked position still collides, the piece returns to its exact
/// pre-rotation blocks. Pivotless pieces are left untouched.
pub fn try_rotate(session: &mut Session) -> bool {
    let Session { grid, active, .. } = session;
    let Some(piece) = active.as_mut() else {
        return false;
    };

    piece.backup();
    if !piece.rotate() {
        return false;
    }

    let kick = piece.wall_kick_distance();
    if kick != 0 {
        piece.translate(kick, 0);
    }

    let ok = piece.fits(grid, 0);
    if !ok {
        piece.restore();
    }
    piece.refresh_drop_distance(grid);
    ok
}

/// Rows the active piece can fall
pub fn hard_drop_distance(session: &Session) -> i8 {
    session
        .active
        .as_ref()
        .map_or(0, |piece| piece.compute_drop_distance(&session.grid))
}

/// Drop the active piece by its hard-drop distance, one validated row at a time
///
/// Returns the number of rows actually travelled. Does not lock; call
/// [`settle`] afterwards.
pub fn hard_drop(session: &mut Session) -> i8 {
    let Session { grid, active, .. } = session;
    let Some(piece) = active.as_mut() else {
        return 0;
    };

    let distance = piece.compute_drop_distance(grid);
    let mut travelled = 0;
    for _ in 0..distance {
        piece.drop_down();
        if !piece.fits(grid, 0) {
            piece.restore();
            break;
        }
        travelled += 1;
    }
    piece.refresh_drop_distance(grid);
    travelled
}

/// Gravity step: one row down unless blocked
pub fn step_down(session: &mut Session) -> bool {
    let Session { grid, active, .. } = session;
    let Some(piece) = active.as_mut() else {
        return false;
    };

    piece.drop_down();
    let ok = piece.fits(grid, 0);
    if !ok {
        piece.restore();
    }
    piece.refresh_drop_distance(grid);
    ok
}

/// Lock the active piece if it cannot fall one more row
///
/// A resting piece with a block in the top row ends the session: the phase
/// becomes [`Phase::GameOver`] and neither the grid nor the score is touched.
/// Otherwise the piece is written into the grid, full rows are cleared, the
/// cleared count is added to the score and the next piece spawns.
pub fn settle(session: &mut Session) -> Settle {
    let Some(piece) = session.active else {
        return Settle::Falling;
    };
    if piece.fits(&session.grid, 1) {
        return Settle::Falling;
    }

    if piece.touches_top() {
        info!("top-out with score {}", session.score);
        session.phase = Phase::GameOver;
        return Settle::ToppedOut;
    }

    if !session.grid.lock_blocks(piece.blocks(), piece.color) {
        warn!("lock: overlapping placement {:?} skipped", piece.blocks());
    }

    let rows_cleared = clear_full_rows(&mut session.grid, |event| {
        session.effects.emit(event, &mut session.rng)
    });
    session.score += rows_cleared;
    debug!(
        "lock: {} rows cleared, score {}",
        rows_cleared, session.score
    );

    session.spawn_piece();
    Settle::Locked { rows_cleared }
}

/// Remove every full row and compact the rows above
///
/// Scans bottom to top once. Each full row reports one event per cell and is
/// emptied; every other row moves down by the number of rows cleared below it.
pub fn clear_full_rows(grid: &mut Grid, mut emit: impl FnMut(EffectEvent)) -> u32 {
    let mut cleared = 0usize;
    for y in (0..GRID_ROWS as usize).rev() {
        if grid.is_row_full(y) {
            for (x, cell) in grid.row(y).iter().enumerate() {
                if let Some(color) = *cell {
                    emit(EffectEvent {
                        x: x as i8,
                        y: y as i8,
                        color,
                    });
                }
            }
            grid.clear_row(y);
            cleared += 1;
        } else if cleared > 0 {
            grid.move_row_down(y, cleared);
        }
    }
    cleared as u32
}

fn step_effects(session: &mut Session, elapsed_ms: u32) {
    session.effect_timer_ms = session.effect_timer_ms.saturating_add(elapsed_ms);
    while session.effect_timer_ms >= EFFECT_STEP_MS {
        session.effects.step(EFFECT_STEP_MS);
        session.effect_timer_ms -= EFFECT_STEP_MS;
    }
    session.effects.discard_out_of_bounds();
}
