//! Session module - the single owning context of a game
//!
//! The grid, the active piece, the lookahead piece and all counters live here.
//! The engine and the phase state machine are free functions over `&mut Session`,
//! so both always see the same instances.

use log::{debug, warn};

use crate::effects::Effects;
use crate::grid::Grid;
use crate::pieces::Piece;
use crate::rng::{Generator, SimpleRng};
use crate::snapshot::{PieceSnapshot, Snapshot};
use crate::types::{Phase, GRID_COLS, LEVEL_STEP, START_LEVEL};

/// Random column attempts before spawn placement falls back to a scan.
const SPAWN_RANDOM_ATTEMPTS: usize = GRID_COLS as usize;

/// Complete game session
#[derive(Debug, Clone)]
pub struct Session {
    pub grid: Grid,
    /// Falling piece; `None` until the first spawn.
    pub active: Option<Piece>,
    /// Lookahead piece in descriptor-local coordinates.
    pub next: Piece,
    pub rng: SimpleRng,
    pub phase: Phase,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    /// Score at which the next level is reached.
    pub level_threshold: u32,
    pub shadow_enabled: bool,
    pub drop_timer_ms: u32,
    pub effect_timer_ms: u32,
    pub effects: Effects,
}

impl Session {
    /// Create a session on the title screen with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = Generator::generate(&mut rng, None);

        Self {
            grid: Grid::new(),
            active: None,
            next,
            rng,
            phase: Phase::Title,
            score: 0,
            high_score: 0,
            level: START_LEVEL,
            level_threshold: LEVEL_STEP,
            shadow_enabled: true,
            drop_timer_ms: 0,
            effect_timer_ms: 0,
            effects: Effects::new(),
        }
    }

    pub fn with_shadow(mut self, enabled: bool) -> Self {
        self.shadow_enabled = enabled;
        self
    }

    /// Promote the lookahead piece to active and generate a new lookahead
    ///
    /// The piece is lifted above the board and moved to a random column offset in
    /// `[1, cols - 2]`, resampled until the placement fits. Random attempts are
    /// bounded; after them the offsets are scanned left to right, and offset 1 is
    /// used if nothing fits. Returns false when the fallback was needed.
    pub fn spawn_piece(&mut self) -> bool {
        let promoted_color = self.next.color;
        let mut base = self.next;
        base.translate(0, -base.kind.spawn_lift());

        let at = |offset: i8| {
            let mut p = base;
            p.translate(offset, 0);
            p
        };

        let mut placed = None;
        for _ in 0..SPAWN_RANDOM_ATTEMPTS {
            let candidate = at(Generator::spawn_offset(&mut self.rng));
            if candidate.fits(&self.grid, 0) {
                placed = Some(candidate);
                break;
            }
        }

        let random_ok = placed.is_some();
        if !random_ok {
            warn!("spawn: no random column fit, scanning offsets");
            placed = (1..=GRID_COLS as i8 - 2)
                .map(|offset| at(offset))
                .find(|p| p.fits(&self.grid, 0));
        }

        let mut piece = placed.unwrap_or_else(|| at(1));
        piece.backup();
        piece.refresh_drop_distance(&self.grid);
        debug!(
            "spawn: {} color={} blocks={:?}",
            piece.kind.as_str(),
            piece.color.as_u8(),
            piece.blocks()
        );

        self.active = Some(piece);
        self.next = Generator::generate(&mut self.rng, Some(promoted_color));
        random_ok
    }

    /// Reset everything a restart resets; phase and high score are left alone
    pub fn reset(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.level = START_LEVEL;
        self.level_threshold = LEVEL_STEP;
        self.drop_timer_ms = 0;
        self.effect_timer_ms = 0;
        self.effects.clear();
    }

    /// Rows between the active piece and its landing spot, if the preview applies
    ///
    /// Present only with the preview enabled, every block on the board and a
    /// non-zero distance.
    pub fn shadow_offset(&self) -> Option<i8> {
        if !self.shadow_enabled {
            return None;
        }
        let active = self.active?;
        if active.is_above_board() || active.hard_drop_distance() <= 0 {
            return None;
        }
        Some(active.hard_drop_distance())
    }

    pub fn snapshot_into(&self, out: &mut Snapshot) {
        self.grid.write_u8_grid(&mut out.board);
        out.active = self.active.as_ref().map(PieceSnapshot::from);
        out.next = PieceSnapshot::from(&self.next);
        out.phase = self.phase;
        out.score = self.score;
        out.high_score = self.high_score;
        out.level = self.level;
        out.shadow_enabled = self.shadow_enabled;
        out.shadow_offset = self.shadow_offset();
        out.particles.clear();
        out.particles.extend_from_slice(self.effects.particles());
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut s = Snapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}
