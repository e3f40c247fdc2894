//! Session state machine
//!
//! Title -> Playing <-> Pause, Playing -> GameOver -> Playing. Only the intents
//! listed for a phase are consumed there; everything else is left for the
//! movement engine or dropped at the end of the tick.

use log::{debug, info};

use crate::core::{HighScoreStore, Session};
use crate::types::{Intent, Phase, LEVEL_STEP};

/// Apply phase-changing intents and per-tick bookkeeping
///
/// Returns the new phase if a transition happened.
pub fn update(
    session: &mut Session,
    intent: &mut Intent,
    store: &mut dyn HighScoreStore,
) -> Option<Phase> {
    let from = session.phase;
    match session.phase {
        Phase::Title => {
            if intent.hard_drop {
                intent.hard_drop = false;
                start(session, store);
            }
        }
        Phase::Playing => {
            commit_high_score(session, store);
            advance_level(session);
            if intent.pause {
                intent.pause = false;
                session.phase = Phase::Pause;
            } else if intent.toggle_shadow {
                intent.toggle_shadow = false;
                session.shadow_enabled = !session.shadow_enabled;
                debug!("shadow preview: {}", session.shadow_enabled);
            }
        }
        Phase::Pause => {
            if intent.pause {
                intent.pause = false;
                session.phase = Phase::Playing;
            }
        }
        Phase::GameOver => {
            if intent.hard_drop {
                intent.hard_drop = false;
                session.reset();
                start(session, store);
            }
        }
    }

    if session.phase != from {
        info!("phase: {} -> {}", from.as_str(), session.phase.as_str());
        Some(session.phase)
    } else {
        None
    }
}

/// Save the score as the new high score if it beats the stored one
pub fn commit_high_score(session: &mut Session, store: &mut dyn HighScoreStore) -> bool {
    if session.score <= session.high_score {
        return false;
    }
    session.high_score = session.score;
    store.save(session.high_score);
    true
}

/// Raise the level by one when the score reaches the threshold
pub fn advance_level(session: &mut Session) -> bool {
    if session.score < session.level_threshold {
        return false;
    }
    session.level += 1;
    session.level_threshold += LEVEL_STEP;
    info!("level {} (next at {})", session.level, session.level_threshold);
    true
}

fn start(session: &mut Session, store: &mut dyn HighScoreStore) {
    session.high_score = store.load();
    session.spawn_piece();
    session.phase = Phase::Playing;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MemoryHighScoreStore;
    use crate::types::{ColorId, START_LEVEL};

    fn press_start() -> Intent {
        Intent {
            hard_drop: true,
            ..Intent::default()
        }
    }

    #[test]
    fn test_title_start_loads_high_score_and_spawns() {
        let mut session = Session::new(5);
        let mut store = MemoryHighScoreStore::with_value(42);
        let mut intent = press_start();

        assert_eq!(update(&mut session, &mut intent, &mut store), Some(Phase::Playing));
        assert_eq!(session.high_score, 42);
        assert!(session.active.is_some());
        assert!(!intent.hard_drop);
    }

    #[test]
    fn test_title_ignores_other_intents() {
        let mut session = Session::new(5);
        let mut store = MemoryHighScoreStore::new();
        let mut intent = Intent {
            pause: true,
            rotate: true,
            move_x: 1,
            ..Intent::default()
        };

        assert_eq!(update(&mut session, &mut intent, &mut store), None);
        assert_eq!(session.phase, Phase::Title);
        assert!(session.active.is_none());
    }

    #[test]
    fn test_pause_round_trip() {
        let mut session = Session::new(5);
        let mut store = MemoryHighScoreStore::new();
        update(&mut session, &mut press_start(), &mut store);

        let mut intent = Intent {
            pause: true,
            ..Intent::default()
        };
        assert_eq!(update(&mut session, &mut intent, &mut store), Some(Phase::Pause));
        assert!(!intent.pause);

        // Start does nothing while paused.
        assert_eq!(update(&mut session, &mut press_start(), &mut store), None);

        intent.pause = true;
        assert_eq!(update(&mut session, &mut intent, &mut store), Some(Phase::Playing));
    }

    #[test]
    fn test_toggle_shadow_only_while_playing() {
        let mut session = Session::new(5);
        let mut store = MemoryHighScoreStore::new();
        let mut intent = Intent {
            toggle_shadow: true,
            ..Intent::default()
        };

        update(&mut session, &mut intent, &mut store);
        assert!(session.shadow_enabled);

        update(&mut session, &mut press_start(), &mut store);
        let mut intent = Intent {
            toggle_shadow: true,
            ..Intent::default()
        };
        update(&mut session, &mut intent, &mut store);
        assert!(!session.shadow_enabled);
        assert!(!intent.toggle_shadow);
    }

    #[test]
    fn test_high_score_saved_when_beaten() {
        let mut session = Session::new(5);
        let mut store = MemoryHighScoreStore::with_value(3);
        update(&mut session, &mut press_start(), &mut store);

        session.score = 3;
        update(&mut session, &mut Intent::default(), &mut store);
        assert_eq!(store.saves(), 0);

        session.score = 4;
        update(&mut session, &mut Intent::default(), &mut store);
        assert_eq!(session.high_score, 4);
        assert_eq!(store.value(), Some(4));
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn test_pausing_tick_still_saves_high_score() {
        let mut session = Session::new(5);
        let mut store = MemoryHighScoreStore::new();
        update(&mut session, &mut press_start(), &mut store);

        session.score = 3;
        let mut intent = Intent {
            pause: true,
            ..Intent::default()
        };
        assert_eq!(update(&mut session, &mut intent, &mut store), Some(Phase::Pause));
        assert_eq!(session.high_score, 3);
        assert_eq!(store.value(), Some(3));
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn test_one_level_per_tick() {
        let mut session = Session::new(5);
        let mut store = MemoryHighScoreStore::new();
        update(&mut session, &mut press_start(), &mut store);

        session.score = 12;
        update(&mut session, &mut Intent::default(), &mut store);
        assert_eq!(session.level, 2);
        assert_eq!(session.level_threshold, 10);

        update(&mut session, &mut Intent::default(), &mut store);
        assert_eq!(session.level, 3);
        assert_eq!(session.level_threshold, 15);

        update(&mut session, &mut Intent::default(), &mut store);
        assert_eq!(session.level, 3);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut session = Session::new(5);
        let mut store = MemoryHighScoreStore::with_value(9);
        update(&mut session, &mut press_start(), &mut store);

        session.grid.set(0, 19, Some(ColorId::TRed));
        session.score = 7;
        session.level = 2;
        session.level_threshold = 10;
        session.drop_timer_ms = 300;
        session.phase = Phase::GameOver;

        assert_eq!(update(&mut session, &mut press_start(), &mut store), Some(Phase::Playing));
        assert_eq!(session.grid.occupied_count(), 0);
        assert_eq!(session.score, 0);
        assert_eq!(session.level, START_LEVEL);
        assert_eq!(session.level_threshold, LEVEL_STEP);
        assert_eq!(session.drop_timer_ms, 0);
        assert_eq!(session.high_score, 9);
        assert!(session.active.is_some());
    }
}
