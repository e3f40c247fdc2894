//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into the per-tick [`crate::types::Intent`]. The
//! collector emulates key release for terminals that never report it, so a
//! held fast-drop key does not stick forever.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::IntentCollector;
pub use map::{map_key, should_quit, KeyAction};
