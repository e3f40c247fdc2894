//! Integration tests for the main game loop

use blockfall::core::{HighScoreStore, MemoryHighScoreStore, Session, SimpleRng};
use blockfall::engine::tick;
use blockfall::input::{IntentCollector, KeyAction};
use blockfall::types::{Intent, Phase, TICK_MS};
use blockfall::FileHighScoreStore;

/// Pseudo-random player driving the collector like the terminal loop does
fn random_press(rng: &mut SimpleRng, input: &mut IntentCollector) {
    let action = match rng.next_range(12) {
        0 | 1 => KeyAction::MoveLeft,
        2 | 3 => KeyAction::MoveRight,
        4 | 5 => KeyAction::Rotate,
        6 => KeyAction::HardDrop,
        7 => KeyAction::FastDrop,
        8 => KeyAction::ToggleShadow,
        _ => return,
    };
    input.press(action, false);
}

#[test]
fn test_game_lifecycle() {
    let mut session = Session::new(12345);
    let mut store = MemoryHighScoreStore::with_value(2);
    assert_eq!(session.phase, Phase::Title);

    // Nothing happens on the title screen until start.
    tick(&mut session, &mut Intent::default(), TICK_MS, &mut store);
    assert_eq!(session.phase, Phase::Title);
    assert!(session.active.is_none());

    let mut intent = Intent {
        hard_drop: true,
        ..Intent::default()
    };
    tick(&mut session, &mut intent, TICK_MS, &mut store);
    assert_eq!(session.phase, Phase::Playing);
    assert_eq!(session.high_score, 2);
    assert!(session.active.is_some());
}

#[test]
fn test_long_random_session_keeps_invariants() {
    let mut session = Session::new(777);
    let mut store = MemoryHighScoreStore::new();
    let mut input = IntentCollector::new().with_key_release_timeout_ms(u32::MAX);
    let mut player = SimpleRng::new(4242);

    input.press(KeyAction::HardDrop, false);
    tick(&mut session, input.intent_mut(), TICK_MS, &mut store);

    let mut last_score = 0;
    let mut games = 0;

    for _ in 0..20_000 {
        random_press(&mut player, &mut input);
        if player.next_range(20) == 0 {
            input.release(KeyAction::FastDrop);
        }
        tick(&mut session, input.intent_mut(), TICK_MS, &mut store);

        let intent = input.intent();
        assert_eq!(intent.move_x, 0);
        assert!(!intent.rotate && !intent.hard_drop && !intent.pause);

        for cell in session.grid.cells().iter().flatten() {
            assert!(cell.is_active());
        }

        match session.phase {
            Phase::Playing => {
                let active = session.active.unwrap();
                assert!(active.fits(&session.grid, 0));
                assert!(session.score >= last_score);
                // The lookahead becomes the next active piece, so this rules out
                // two consecutive pieces with the same color.
                assert_ne!(session.next.color, active.color);
                last_score = session.score;
            }
            Phase::GameOver => {
                games += 1;
                assert!(session.high_score >= session.score);
                input.press(KeyAction::HardDrop, false);
                tick(&mut session, input.intent_mut(), TICK_MS, &mut store);
                assert_eq!(session.phase, Phase::Playing);
                assert_eq!(session.score, 0);
                assert_eq!(session.grid.occupied_count(), 0);
                last_score = 0;
            }
            phase => panic!("unexpected phase {:?}", phase),
        }
    }

    assert!(games > 0, "random play should top out at least once");
    assert_eq!(store.load(), session.high_score);
}

#[test]
fn test_high_score_persists_across_sessions() {
    let path = std::env::temp_dir().join(format!(
        "blockfall_integration_{}.txt",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ));
    let mut store = FileHighScoreStore::new(&path);

    let mut session = Session::new(1);
    let mut start = Intent {
        hard_drop: true,
        ..Intent::default()
    };
    tick(&mut session, &mut start, 0, &mut store);
    session.score = 6;
    tick(&mut session, &mut Intent::default(), 0, &mut store);
    assert_eq!(session.high_score, 6);

    let mut fresh = Session::new(2);
    let mut start = Intent {
        hard_drop: true,
        ..Intent::default()
    };
    tick(&mut fresh, &mut start, 0, &mut store);
    assert_eq!(fresh.high_score, 6);

    let _ = std::fs::remove_file(path);
}
