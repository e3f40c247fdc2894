//! RNG module - random piece generation
//!
//! Pieces are drawn uniformly: any of the seven shapes, any of the seven active
//! colors except the color of the piece being replaced in the lookahead slot.
//! There is no bag; consecutive shapes may repeat, consecutive colors may not.
//!
//! Also provides a simple LCG so sessions are reproducible from a seed.

use crate::pieces::Piece;
use crate::types::{ColorId, ACTIVE_COLORS, ALL_SHAPES, GRID_COLS};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Random value in `[0, 1)`
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Current state (reseeding with it continues the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Stateless piece factory
pub struct Generator;

impl Generator {
    /// Generate a piece in descriptor-local coordinates
    ///
    /// The color is resampled until it differs from `last_color`. With seven
    /// candidates this terminates almost surely.
    pub fn generate(rng: &mut SimpleRng, last_color: Option<ColorId>) -> Piece {
        let kind = ALL_SHAPES[rng.next_range(ALL_SHAPES.len() as u32) as usize];
        let color = loop {
            let color = ACTIVE_COLORS[rng.next_range(ACTIVE_COLORS.len() as u32) as usize];
            if Some(color) != last_color {
                break color;
            }
        };
        Piece::new(kind, color)
    }

    /// Random spawn column offset in `[1, GRID_COLS - 2]`
    pub fn spawn_offset(rng: &mut SimpleRng) -> i8 {
        (rng.next_range(GRID_COLS as u32 - 2) + 1) as i8
    }
}
