pub mod leaderboard;
pub mod service;
