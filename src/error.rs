// src/error.rs

/// Everything that can go wrong around a game session.
///
/// None of these are fatal to gameplay: invalid orders are re-requested,
/// a finished game simply refuses more turns and storage failures fall back
/// to an in-memory leaderboard.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("invalid order: {0}")]
    InvalidOrder(String),
    #[error("game already ended at week {week}")]
    GameAlreadyTerminal { week: u32 },
    #[error("leaderboard storage unavailable: {0}")]
    PersistenceUnavailable(String),
    #[error("history export failed: {0}")]
    Export(String),
    #[error("config error: {0}")]
    Config(String),
}

impl From<std::io::Error> for GameError {
    fn from(value: std::io::Error) -> Self {
        Self::PersistenceUnavailable(value.to_string())
    }
}

impl From<serde_json::Error> for GameError {
    fn from(value: serde_json::Error) -> Self {
        Self::PersistenceUnavailable(value.to_string())
    }
}

impl From<csv::Error> for GameError {
    fn from(value: csv::Error) -> Self {
        Self::Export(value.to_string())
    }
}
