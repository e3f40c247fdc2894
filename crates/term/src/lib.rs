//! Terminal "game renderer" module.
//!
//! Renders a session [`core::Snapshot`] into a framebuffer of styled character
//! cells and flushes it to the terminal with crossterm. Only the renderer does
//! I/O; [`GameView`] is pure and unit-tested.
//!
//! Board cells are drawn 2 columns wide to compensate for the glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
