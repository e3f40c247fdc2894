//! High score persistence seam
//!
//! The core never touches storage directly. A session is handed a store that
//! loads and saves a single integer; failures are the store's business and never
//! reach the game logic.

/// Persistence for the single high-score value
pub trait HighScoreStore {
    /// Stored value, or 0 when nothing has been stored yet
    fn load(&mut self) -> u32;

    /// Persist a new high score
    fn save(&mut self, value: u32);
}

/// In-memory store, used by tests and headless runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHighScoreStore {
    value: Option<u32>,
    saves: u32,
}

impl MemoryHighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self {
            value: Some(value),
            saves: 0,
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }

    /// Number of `save` calls seen
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&mut self) -> u32 {
        self.value.unwrap_or(0)
    }

    fn save(&mut self, value: u32) {
        self.value = Some(value);
        self.saves += 1;
    }
}
