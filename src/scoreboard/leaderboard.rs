// src/scoreboard/leaderboard.rs

use crate::model::state::SimulationState;
use crate::simulation::config::LEADERBOARD_SIZE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: f64,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// The best results so far, highest score first, at most `LEADERBOARD_SIZE` long.
///
/// Serializes as a plain JSON array of `{"name", "score"}` objects. Reading
/// one back sorts and truncates it like any other leaderboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ScoreEntry>", into = "Vec<ScoreEntry>")]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl From<Vec<ScoreEntry>> for Leaderboard {
    fn from(entries: Vec<ScoreEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<Leaderboard> for Vec<ScoreEntry> {
    fn from(board: Leaderboard) -> Self {
        board.entries
    }
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorts and truncates arbitrary entries, e.g. ones read back from storage.
    pub fn from_entries(entries: Vec<ScoreEntry>) -> Self {
        let mut board = Self { entries };
        board.normalize();
        board
    }

    /// Adds a result and keeps the top entries.
    ///
    /// Equal scores keep their existing order, so an older result stays
    /// ahead of a newer one with the same score.
    pub fn record(self, name: impl Into<String>, score: f64) -> Self {
        self.record_ranked(name, score).0
    }

    /// Like [`Leaderboard::record`], also returning the new entry's 1-based
    /// position, or `None` if it was cut.
    ///
    /// A repeat of an existing name and score lands after the older entry,
    /// so it is that later position that decides whether it made the cut.
    pub fn record_ranked(mut self, name: impl Into<String>, score: f64) -> (Self, Option<usize>) {
        let name = name.into();
        self.entries.push(ScoreEntry::new(name.clone(), score));
        self.sort();

        let rank = self
            .entries
            .iter()
            .rposition(|e| e.name == name && e.score == score)
            .filter(|&i| i < LEADERBOARD_SIZE)
            .map(|i| i + 1);

        self.entries.truncate(LEADERBOARD_SIZE);
        (self, rank)
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 1-based position of the first entry matching both name and score.
    pub fn rank_of(&self, name: &str, score: f64) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.name == name && e.score == score)
            .map(|i| i + 1)
    }

    fn normalize(&mut self) {
        self.sort();
        self.entries.truncate(LEADERBOARD_SIZE);
    }

    fn sort(&mut self) {
        self.entries.retain(|e| e.score.is_finite());
        self.entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    }
}

/// Final score of a game: revenue minus cost. May be negative.
pub fn compute_score(state: &SimulationState) -> f64 {
    state.profit()
}
