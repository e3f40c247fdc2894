//! Game engine - movement, collision and the session state machine
//!
//! Everything here is a free function over `&mut Session`, driven once per tick:
//!
//! 1. [`phase::update`] consumes start/pause/shadow intents and does the
//!    per-tick bookkeeping (high score, level).
//! 2. [`logic::update`] consumes movement intents and elapsed time.
//! 3. Discrete intents nobody consumed are dropped.
//!
//! # Example
//!
//! ```
//! use blockfall_core::{MemoryHighScoreStore, Session};
//! use blockfall_engine::tick;
//! use blockfall_types::{Intent, Phase};
//!
//! let mut session = Session::new(1);
//! let mut store = MemoryHighScoreStore::new();
//! let mut intent = Intent { hard_drop: true, ..Intent::default() };
//!
//! tick(&mut session, &mut intent, 16, &mut store);
//! assert_eq!(session.phase, Phase::Playing);
//! assert!(intent.is_idle());
//! ```

pub mod logic;
pub mod phase;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use logic::{Settle, TickReport};

use crate::core::{HighScoreStore, Session};
use crate::types::Intent;

/// Advance the session by one tick
///
/// Leaves only `fast_drop_held` in `intent`.
pub fn tick(
    session: &mut Session,
    intent: &mut Intent,
    elapsed_ms: u32,
    store: &mut dyn HighScoreStore,
) -> TickReport {
    phase::update(session, intent, store);
    let report = logic::update(session, intent, elapsed_ms);
    if report.topped_out {
        phase::commit_high_score(session, store);
    }
    intent.clear_discrete();
    report
}
