// src/io/store.rs

use crate::error::GameError;
use crate::scoreboard::leaderboard::Leaderboard;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where the leaderboard's single JSON record lives.
pub trait LeaderboardStore {
    /// Reads the stored leaderboard. A store with nothing in it yields an
    /// empty leaderboard; unreadable or corrupt data is an error.
    fn load(&self) -> Result<Leaderboard, GameError>;

    fn save(&mut self, leaderboard: &Leaderboard) -> Result<(), GameError>;
}

/// Pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LeaderboardStore for JsonFileStore {
    fn load(&self) -> Result<Leaderboard, GameError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Leaderboard::new()),
            Err(e) => return Err(e.into()),
        };
        parse_leaderboard(&json)
    }

    fn save(&mut self, leaderboard: &Leaderboard) -> Result<(), GameError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(leaderboard)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Keeps the serialized record in memory. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `raw`, valid or not.
    pub fn with_record(raw: impl Into<String>) -> Self {
        Self {
            record: Some(raw.into()),
        }
    }

    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }
}

impl LeaderboardStore for MemoryStore {
    fn load(&self) -> Result<Leaderboard, GameError> {
        match &self.record {
            Some(json) => parse_leaderboard(json),
            None => Ok(Leaderboard::new()),
        }
    }

    fn save(&mut self, leaderboard: &Leaderboard) -> Result<(), GameError> {
        self.record = Some(serde_json::to_string(leaderboard)?);
        Ok(())
    }
}

fn parse_leaderboard(json: &str) -> Result<Leaderboard, GameError> {
    Ok(serde_json::from_str(json)?)
}
