//! Effects module - particles thrown out of cleared rows
//!
//! The engine emits one [`EffectEvent`] per cleared cell. Each event becomes a
//! particle with a random upward launch that falls under gravity until it leaves
//! the board, at which point it is discarded. Positions are in cell units with
//! the origin at the top-left of the board.

use crate::rng::SimpleRng;
use crate::types::{ColorId, GRID_COLS, GRID_ROWS};

/// Launch speed range in cells per second.
const MIN_SPEED: f32 = 4.0;
const SPEED_SPREAD: f32 = 5.0;

/// Downward acceleration in cells per second squared.
const GRAVITY: f32 = 20.0;

/// "Spawn an effect at this cell with this color"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectEvent {
    pub x: i8,
    pub y: i8,
    pub color: ColorId,
}

/// A live particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: ColorId,
}

impl Particle {
    fn launch(event: EffectEvent, rng: &mut SimpleRng) -> Self {
        let speed = MIN_SPEED + rng.next_f32() * SPEED_SPREAD;
        // 1°..=180°, always upward.
        let angle = (1.0 + rng.next_f32() * 179.0).to_radians();
        Self {
            x: event.x as f32,
            y: event.y as f32,
            vx: speed * angle.cos(),
            vy: -speed * angle.sin(),
            color: event.color,
        }
    }

    fn step(&mut self, dt: f32) {
        self.x += self.vx * dt;
        self.y += self.vy * dt;
        self.vy += GRAVITY * dt;
    }

    /// Still over the board (particles may fly above the top edge)
    pub fn in_bounds(&self) -> bool {
        self.y <= GRID_ROWS as f32 && self.x >= 0.0 && self.x <= GRID_COLS as f32
    }
}

/// Live particle container
#[derive(Debug, Clone, Default)]
pub struct Effects {
    particles: Vec<Particle>,
}

impl Effects {
    pub fn new() -> Self {
        Self {
            particles: Vec::with_capacity((GRID_COLS as usize) * 4),
        }
    }

    /// Create a particle for an emitted event
    pub fn emit(&mut self, event: EffectEvent, rng: &mut SimpleRng) {
        self.particles.push(Particle::launch(event, rng));
    }

    /// Advance every particle by `dt_ms` of game time
    pub fn step(&mut self, dt_ms: u32) {
        let dt = dt_ms as f32 / 1000.0;
        for p in &mut self.particles {
            p.step(dt);
        }
    }

    /// Drop particles that have left the board
    pub fn discard_out_of_bounds(&mut self) {
        self.particles.retain(Particle::in_bounds);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
