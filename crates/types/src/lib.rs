//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, engine, terminal rendering).
//!
//! # Grid Dimensions
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - Rows above the board are negative; freshly spawned pieces live there.
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Default loop interval (~60 FPS) |
//! | `FAST_DROP_INTERVAL_MS` | 20 | Gravity while fast drop is held |
//! | `EFFECT_STEP_MS` | 10 | Particle physics cadence |
//! | `LEVEL_STEP` | 5 | Score points per difficulty level |
//!
//! # Drop Intervals by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 800ms |
//! | 3 | 600ms |
//! | 4 | 400ms |
//! | 5+ | 200ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{ColorId, Intent, ShapeKind, GRID_COLS, GRID_ROWS};
//!
//! assert_eq!(GRID_COLS, 10);
//! assert_eq!(GRID_ROWS, 20);
//!
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! assert!(ColorId::TRed.is_active());
//! assert!(!ColorId::Navy.is_active());
//!
//! let mut intent = Intent::default();
//! intent.move_x = -1;
//! intent.clear_discrete();
//! assert_eq!(intent.move_x, 0);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_COLS: u8 = 10;

/// Grid height in cells (20 rows)
pub const GRID_ROWS: u8 = 20;

/// Default loop interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity intervals by level (milliseconds per row).
///
/// Index 0 = level 1, index 4 = level 5 and above.
pub const DROP_INTERVALS_MS: [u32; 5] = [1000, 800, 600, 400, 200];

/// Gravity interval while the fast-drop key is held, regardless of level.
pub const FAST_DROP_INTERVAL_MS: u32 = 20;

/// Score points between difficulty levels.
pub const LEVEL_STEP: u32 = 5;

/// Level a fresh session starts at.
pub const START_LEVEL: u32 = 1;

/// Particle physics step.
pub const EFFECT_STEP_MS: u32 = 10;

/// Logical name of the persisted high score.
pub const HIGHSCORE_KEY: &str = "score.txt";

/// Gravity interval for a difficulty level (levels start at 1).
pub fn drop_interval_ms(level: u32) -> u32 {
    let idx = level.saturating_sub(1) as usize;
    DROP_INTERVALS_MS[idx.min(DROP_INTERVALS_MS.len() - 1)]
}

/// The seven piece shapes
///
/// Declaration order is the shape table order (O first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    O,
    S,
    Z,
    I,
    L,
    J,
    T,
}

/// All shapes in table order.
pub const ALL_SHAPES: [ShapeKind; 7] = [
    ShapeKind::O,
    ShapeKind::S,
    ShapeKind::Z,
    ShapeKind::I,
    ShapeKind::L,
    ShapeKind::J,
    ShapeKind::T,
];

impl ShapeKind {
    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(ShapeKind::O),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "i" => Some(ShapeKind::I),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "t" => Some(ShapeKind::T),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::O => "o",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::I => "i",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::T => "t",
        }
    }

    /// Rows a fresh piece is lifted so it starts fully above the board.
    pub fn spawn_lift(&self) -> i8 {
        match self {
            ShapeKind::I => 4,
            ShapeKind::O => 2,
            _ => 3,
        }
    }
}

/// Palette color ids
///
/// Ids 0-8 are board/decoration colors; ids 9-15 (the `T*` colors) are the
/// only ones a piece can carry, so every occupied grid cell holds one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColorId {
    Black = 0,
    Silver = 1,
    Grey = 2,
    Navy = 3,
    Cyan = 4,
    Magenta = 5,
    Red = 6,
    Green = 7,
    Blue = 8,
    TRed = 9,
    TViolet = 10,
    TOrange = 11,
    TYellow = 12,
    TGreen = 13,
    TBlue = 14,
    TBlueDark = 15,
}

/// The active sub-palette pieces draw their color from.
pub const ACTIVE_COLORS: [ColorId; 7] = [
    ColorId::TRed,
    ColorId::TViolet,
    ColorId::TOrange,
    ColorId::TYellow,
    ColorId::TGreen,
    ColorId::TBlue,
    ColorId::TBlueDark,
];

impl ColorId {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        let color = match v {
            0 => ColorId::Black,
            1 => ColorId::Silver,
            2 => ColorId::Grey,
            3 => ColorId::Navy,
            4 => ColorId::Cyan,
            5 => ColorId::Magenta,
            6 => ColorId::Red,
            7 => ColorId::Green,
            8 => ColorId::Blue,
            9 => ColorId::TRed,
            10 => ColorId::TViolet,
            11 => ColorId::TOrange,
            12 => ColorId::TYellow,
            13 => ColorId::TGreen,
            14 => ColorId::TBlue,
            15 => ColorId::TBlueDark,
            _ => return None,
        };
        Some(color)
    }

    /// Whether this color belongs to the active piece palette.
    pub fn is_active(self) -> bool {
        self.as_u8() >= ColorId::TRed.as_u8()
    }

    /// 24-bit RGB value of this palette entry.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorId::Black => (0, 0, 0),
            ColorId::Silver => (192, 192, 192),
            ColorId::Grey => (128, 128, 128),
            ColorId::Navy => (0, 0, 128),
            ColorId::Cyan => (0, 255, 255),
            ColorId::Magenta => (255, 0, 255),
            ColorId::Red => (255, 0, 0),
            ColorId::Green => (0, 255, 0),
            ColorId::Blue => (0, 0, 255),
            ColorId::TRed => (220, 20, 60),
            ColorId::TViolet => (186, 85, 211),
            ColorId::TOrange => (255, 165, 0),
            ColorId::TYellow => (255, 215, 0),
            ColorId::TGreen => (173, 255, 47),
            ColorId::TBlue => (135, 206, 250),
            ColorId::TBlueDark => (30, 144, 255),
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(ColorId)`: Cell filled by a locked piece of that color
pub type Cell = Option<ColorId>;

/// Session phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Title,
    Playing,
    Pause,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Title => "title",
            Phase::Playing => "playing",
            Phase::Pause => "pause",
            Phase::GameOver => "game_over",
        }
    }
}

/// Pre-decoded input for one tick
///
/// `move_x`, `rotate`, `hard_drop` and `toggle_shadow` are edge-triggered and
/// cleared by the core once consumed. `hard_drop` doubles as the start/restart
/// intent on the title and game-over screens. `pause` is set on key down and
/// cleared either on key up or when the state machine consumes it.
/// `fast_drop_held` is level-triggered and only the input side clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intent {
    pub move_x: i8,
    pub rotate: bool,
    pub hard_drop: bool,
    pub fast_drop_held: bool,
    pub pause: bool,
    pub toggle_shadow: bool,
}

impl Intent {
    /// Drop every edge-triggered field, keeping the held keys.
    pub fn clear_discrete(&mut self) {
        self.move_x = 0;
        self.rotate = false;
        self.hard_drop = false;
        self.toggle_shadow = false;
        self.pause = false;
    }

    pub fn is_idle(&self) -> bool {
        *self == Intent::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_interval_table() {
        assert_eq!(drop_interval_ms(0), 1000);
        assert_eq!(drop_interval_ms(1), 1000);
        assert_eq!(drop_interval_ms(2), 800);
        assert_eq!(drop_interval_ms(3), 600);
        assert_eq!(drop_interval_ms(4), 400);
        assert_eq!(drop_interval_ms(5), 200);
        assert_eq!(drop_interval_ms(42), 200);
    }

    #[test]
    fn active_palette_has_seven_distinct_colors() {
        assert_eq!(ACTIVE_COLORS.len(), 7);
        for (i, a) in ACTIVE_COLORS.iter().enumerate() {
            assert!(a.is_active());
            for b in &ACTIVE_COLORS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn color_id_u8_roundtrip() {
        for id in 0..16u8 {
            let color = ColorId::from_u8(id).unwrap();
            assert_eq!(color.as_u8(), id);
        }
        assert_eq!(ColorId::from_u8(16), None);
    }
}
