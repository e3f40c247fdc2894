//! Intent collector for terminal environments.
//!
//! Folds key events into the [`Intent`] handed to the engine each tick. Supports
//! terminals that do not emit key release events by using a timeout.

use std::time::Instant;

use crossterm::event::{KeyEvent, KeyEventKind};
use log::trace;

use crate::map::{map_key, KeyAction};
use crate::types::Intent;

// In terminals without key-release events, a short timeout ends a held
// fast drop once the terminal stops repeating the key.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Accumulates input between ticks.
#[derive(Debug, Clone)]
pub struct IntentCollector {
    intent: Intent,
    last_fast_drop: Instant,
    key_release_timeout_ms: u32,
}

impl IntentCollector {
    pub fn new() -> Self {
        Self {
            intent: Intent::default(),
            last_fast_drop: Instant::now(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Feed one terminal key event
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let Some(action) = map_key(key) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press => self.press(action, false),
            KeyEventKind::Repeat => self.press(action, true),
            KeyEventKind::Release => self.release(action),
        }
    }

    /// Apply a key-down (or auto-repeat) for an action
    pub fn press(&mut self, action: KeyAction, repeat: bool) {
        trace!("key {:?} repeat={}", action, repeat);
        match action {
            KeyAction::MoveLeft => self.intent.move_x = -1,
            KeyAction::MoveRight => self.intent.move_x = 1,
            KeyAction::Rotate => self.intent.rotate = true,
            KeyAction::FastDrop => {
                self.intent.fast_drop_held = true;
                self.last_fast_drop = Instant::now();
            }
            KeyAction::HardDrop if !repeat => self.intent.hard_drop = true,
            KeyAction::Pause if !repeat => self.intent.pause = true,
            KeyAction::ToggleShadow if !repeat => self.intent.toggle_shadow = true,
            _ => {}
        }
    }

    /// Apply a key-up for an action
    pub fn release(&mut self, action: KeyAction) {
        match action {
            KeyAction::FastDrop => self.intent.fast_drop_held = false,
            KeyAction::Pause => self.intent.pause = false,
            _ => {}
        }
    }

    /// Intent for the coming tick, after auto-release
    ///
    /// The engine consumes the edge-triggered fields in place.
    pub fn intent_mut(&mut self) -> &mut Intent {
        // Auto-release when terminal does not emit release events.
        if self.intent.fast_drop_held {
            let held_for = self.last_fast_drop.elapsed().as_millis() as u32;
            if held_for > self.key_release_timeout_ms {
                self.intent.fast_drop_held = false;
            }
        }
        &mut self.intent
    }

    pub fn intent(&self) -> &Intent {
        &self.intent
    }

    pub fn reset(&mut self) {
        self.intent = Intent::default();
        self.last_fast_drop = Instant::now();
    }
}

impl Default for IntentCollector {
    fn default() -> Self {
        Self::new()
    }
}
