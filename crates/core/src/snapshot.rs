//! Snapshot module - read-only view of a session for renderers
//!
//! Frontends keep one `Snapshot` alive and refill it every frame, so `clear`
//! keeps the particle buffer's allocation.

use crate::effects::Particle;
use crate::pieces::{Block, Piece};
use crate::types::{ColorId, Phase, ShapeKind, GRID_COLS, GRID_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: ShapeKind,
    pub color: ColorId,
    pub blocks: [Block; 4],
}

impl From<&Piece> for PieceSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind,
            color: value.color,
            blocks: *value.blocks(),
        }
    }
}

/// Read-only view of a session between ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub board: [[u8; GRID_COLS as usize]; GRID_ROWS as usize],
    pub active: Option<PieceSnapshot>,
    pub next: PieceSnapshot,
    pub phase: Phase,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub shadow_enabled: bool,
    pub shadow_offset: Option<i8>,
    pub particles: Vec<Particle>,
}

impl Snapshot {
    pub fn clear(&mut self) {
        let mut particles = std::mem::take(&mut self.particles);
        particles.clear();
        *self = Self {
            particles,
            ..Self::default()
        };
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; GRID_COLS as usize]; GRID_ROWS as usize],
            active: None,
            next: PieceSnapshot {
                kind: ShapeKind::O,
                color: ColorId::TRed,
                blocks: [(0, 0); 4],
            },
            phase: Phase::Title,
            score: 0,
            high_score: 0,
            level: 0,
            shadow_enabled: false,
            shadow_offset: None,
            particles: Vec::new(),
        }
    }
}
