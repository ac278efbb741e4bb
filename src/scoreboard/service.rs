// src/scoreboard/service.rs

use crate::io::store::LeaderboardStore;
use crate::model::state::SimulationState;
use crate::scoreboard::leaderboard::{compute_score, Leaderboard};
use tracing::warn;

/// How a finished game landed on the leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    pub score: f64,
    /// 1-based position, `None` if the score did not make the cut.
    pub rank: Option<usize>,
    /// False when the store could not be written; the leaderboard is then
    /// only up to date in memory.
    pub persisted: bool,
}

/// Keeps the leaderboard for a session and writes every change through to a store.
///
/// Storage problems never interrupt play: an unreadable store starts the
/// session with an empty leaderboard, and a failed write keeps the new
/// ranking in memory.
#[derive(Debug)]
pub struct ScoreboardService<S> {
    store: S,
    leaderboard: Leaderboard,
}

impl<S: LeaderboardStore> ScoreboardService<S> {
    pub fn open(store: S) -> Self {
        let leaderboard = store.load().unwrap_or_else(|e| {
            warn!("could not load leaderboard, starting empty: {e}");
            Leaderboard::new()
        });
        Self { store, leaderboard }
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Scores a finished game for `name` and merges it into the leaderboard.
    pub fn record(&mut self, state: &SimulationState, name: &str) -> ScoreReport {
        let score = compute_score(state);
        self.record_score(name, score)
    }

    pub fn record_score(&mut self, name: &str, score: f64) -> ScoreReport {
        let (leaderboard, rank) = std::mem::take(&mut self.leaderboard).record_ranked(name, score);
        self.leaderboard = leaderboard;

        let persisted = match self.store.save(&self.leaderboard) {
            Ok(()) => true,
            Err(e) => {
                warn!("could not save leaderboard, keeping it in memory: {e}");
                false
            }
        };

        ScoreReport {
            score,
            rank,
            persisted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::io::store::MemoryStore;

    /// A store whose every operation fails.
    #[derive(Debug, Default)]
    struct BrokenStore;

    impl LeaderboardStore for BrokenStore {
        fn load(&self) -> Result<Leaderboard, GameError> {
            Err(GameError::PersistenceUnavailable("disk on fire".into()))
        }

        fn save(&mut self, _leaderboard: &Leaderboard) -> Result<(), GameError> {
            Err(GameError::PersistenceUnavailable("disk on fire".into()))
        }
    }

    #[test]
    fn test_records_profit_of_final_state() {
        let mut service = ScoreboardService::open(MemoryStore::new());
        let state = SimulationState {
            total_revenue: 200.0,
            total_cost: 80.0,
            ..SimulationState::new()
        };

        let report = service.record(&state, "Alice");
        assert_eq!(report.score, 120.0);
        assert_eq!(report.rank, Some(1));
        assert!(report.persisted);
        assert!(service.store().record().unwrap().contains("Alice"));
    }

    #[test]
    fn test_corrupt_store_starts_empty() {
        let service = ScoreboardService::open(MemoryStore::with_record("][ garbage"));
        assert!(service.leaderboard().is_empty());
    }

    #[test]
    fn test_repeat_score_cut_from_full_board_reports_no_rank() {
        let mut service = ScoreboardService::open(MemoryStore::new());
        for (name, score) in [("a", 50.0), ("b", 40.0), ("c", 30.0), ("d", 20.0), ("Alice", 10.0)] {
            service.record_score(name, score);
        }

        let report = service.record_score("Alice", 10.0);
        assert_eq!(report.rank, None);
        assert!(report.persisted);
        let alice_entries = service
            .leaderboard()
            .entries()
            .iter()
            .filter(|e| e.name == "Alice")
            .count();
        assert_eq!(alice_entries, 1);
    }

    #[test]
    fn test_broken_store_keeps_ranking_in_memory() {
        let mut service = ScoreboardService::open(BrokenStore);
        let report = service.record_score("Alice", 120.0);
        assert!(!report.persisted);
        assert_eq!(report.rank, Some(1));

        service.record_score("Bob", 80.0);
        assert_eq!(service.leaderboard().len(), 2);
    }
}
