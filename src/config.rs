//! Runtime configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{HIGHSCORE_KEY, TICK_MS};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Plain-text file holding the high score.
    pub highscore_path: PathBuf,
    /// RNG seed; `None` seeds from the clock.
    pub seed: Option<u32>,
    /// Loop interval in milliseconds.
    pub tick_ms: u32,
    /// Shadow preview enabled at start.
    pub shadow: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            highscore_path: PathBuf::from(HIGHSCORE_KEY),
            seed: None,
            tick_ms: TICK_MS,
            shadow: true,
        }
    }
}

impl Config {
    /// Create from environment variables
    ///
    /// - `BLOCKFALL_HIGHSCORE_PATH`: high score file (default `score.txt`)
    /// - `BLOCKFALL_SEED`: fixed RNG seed
    /// - `BLOCKFALL_TICK_MS`: loop interval, at least 1 (default 16)
    /// - `BLOCKFALL_SHADOW`: `0`/`false`/`off` starts with the preview hidden
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let highscore_path = lookup("BLOCKFALL_HIGHSCORE_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.highscore_path);

        let seed = lookup("BLOCKFALL_SEED").and_then(|s| s.trim().parse().ok());

        let tick_ms = lookup("BLOCKFALL_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(defaults.tick_ms);

        let shadow = lookup("BLOCKFALL_SHADOW")
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "off"))
            .unwrap_or(defaults.shadow);

        Self {
            highscore_path,
            seed,
            tick_ms,
            shadow,
        }
    }

    /// Configured seed, or one derived from the system clock
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}
