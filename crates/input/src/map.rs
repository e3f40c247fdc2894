//! Key mapping from terminal events to key actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key means to the game, before it is folded into an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    MoveLeft,
    MoveRight,
    Rotate,
    FastDrop,
    /// Hard drop while playing; start on the title and game-over screens.
    HardDrop,
    Pause,
    ToggleShadow,
}

/// Map keyboard input to key actions.
pub fn map_key(key: KeyEvent) -> Option<KeyAction> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(KeyAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(KeyAction::MoveRight),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(KeyAction::FastDrop),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(KeyAction::Rotate),

        KeyCode::Char(' ') => Some(KeyAction::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(KeyAction::Pause),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(KeyAction::ToggleShadow),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
