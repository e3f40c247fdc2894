//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the data the engine mutates: the grid, the pieces, the random
//! generator and the owning session context. It has **zero dependencies** on UI,
//! terminal I/O or storage, which makes it:
//!
//! - **Deterministic**: Same seed produces identical sessions
//! - **Testable**: Every rule can be exercised headless
//! - **Portable**: Any frontend can drive it through [`Session`] and [`Snapshot`]
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 settled-cell matrix
//! - [`pieces`]: Shape descriptors, rotation, wall kick distance, collision, drop distance
//! - [`rng`]: Seeded LCG and the piece [`Generator`]
//! - [`session`]: The owning context and the single spawn operation
//! - [`effects`]: Particles thrown out of cleared rows
//! - [`highscore`]: Persistence seam for the high score
//! - [`snapshot`]: Read-only view for renderers
//!
//! # Game Rules
//!
//! - **Uniform generator**: Any shape, any active color except the previous lookahead color
//! - **Pivot rotation**: 90° around a pivot block, square never rotates
//! - **Single wall kick**: One horizontal correction after rotation, else rollback
//! - **Immediate lock**: A piece locks the moment it cannot fall one more row
//! - **Scoring**: One point per cleared row, one level per 5 points
//!
//! # Example
//!
//! ```
//! use blockfall_core::Session;
//!
//! let mut session = Session::new(12345);
//! session.spawn_piece();
//!
//! let active = session.active.unwrap();
//! assert!(active.fits(&session.grid, 0));
//! assert_ne!(active.color, session.next.color);
//! ```

pub mod effects;
pub mod grid;
pub mod highscore;
pub mod pieces;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use effects::{EffectEvent, Effects, Particle};
pub use grid::Grid;
pub use highscore::{HighScoreStore, MemoryHighScoreStore};
pub use pieces::{descriptor, Block, Piece, ShapeDescriptor};
pub use rng::{Generator, SimpleRng};
pub use session::Session;
pub use snapshot::{PieceSnapshot, Snapshot};
