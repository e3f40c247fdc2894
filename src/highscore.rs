//! File-backed high score store.
//!
//! The file holds a single decimal integer. Storage problems never reach the
//! game: a missing or unreadable file reads as 0 and failed writes are logged
//! and dropped.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::core::HighScoreStore;

#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored value; `Ok(None)` when the file does not exist yet
    pub fn read_value(&self) -> Result<Option<u32>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("read {}", self.path.display()));
            }
        };
        let value = text
            .trim()
            .parse()
            .with_context(|| format!("parse high score in {}", self.path.display()))?;
        Ok(Some(value))
    }

    pub fn write_value(&self, value: u32) -> Result<()> {
        fs::write(&self.path, value.to_string())
            .with_context(|| format!("write {}", self.path.display()))
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&mut self) -> u32 {
        match self.read_value() {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("no high score at {}", self.path.display());
                0
            }
            Err(e) => {
                warn!("high score unavailable: {:#}", e);
                0
            }
        }
    }

    fn save(&mut self, value: u32) {
        if let Err(e) = self.write_value(value) {
            warn!("high score not saved: {:#}", e);
        }
    }
}
