// src/simulation/config.rs

use crate::error::GameError;
use std::path::PathBuf;

// Game rules. These are fixed: every player plays the same 26-week, four-tier game.

/// The week on which the game ends. Orders are still accepted on this week,
/// but the action closes the game instead of advancing it.
pub const WEEK_LIMIT: u32 = 26;
pub const INITIAL_STOCK: u32 = 8;
pub const INITIAL_INCOMING_ORDER: u32 = 4;
/// Sale price per unit sold by the retailer.
pub const BEER_PRICE: f64 = 5.0;
/// Storage cost per unit held per week, summed over all four tiers.
pub const STORAGE_COST: f64 = 0.5;
/// Weeks a backlog entry ages before it is counted as lost orders.
pub const BACKLOG_LIMIT: u32 = 2;
/// Share of the retailer's post-shipment stock that spoils each week, rounded down.
pub const SPOILAGE_PERCENT: u32 = 10;

pub const CAMPAIGN_INTERVAL: u32 = 4;
pub const CAMPAIGN_PROBABILITY: f64 = 0.5;
pub const MAX_SALES_INCREASE: u32 = 3;
pub const MAX_BASE_DEMAND: u32 = 10;

pub const LEADERBOARD_SIZE: usize = 5;
/// Fixed key the leaderboard is stored under.
pub const LEADERBOARD_KEY: &str = "beerGameRanking";
/// Order quantity offered to the player before they type anything.
pub const DEFAULT_ORDER: u32 = 4;

/// Runtime settings for one invocation of the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub player_name: Option<String>,
    /// Seed for deterministic replay; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub leaderboard_path: PathBuf,
    /// Where to write the weekly history as CSV once a game ends.
    pub export_path: Option<PathBuf>,
    /// Policy spec such as `naive` or `base-stock:24`; `None` means interactive play.
    pub autopilot: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player_name: None,
            seed: None,
            leaderboard_path: default_leaderboard_path(),
            export_path: None,
            autopilot: None,
        }
    }
}

impl SessionConfig {
    /// Builds a config from command-line arguments (without the program name).
    pub fn from_args<I, S>(args: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter().map(Into::<String>::into);

        while let Some(flag) = args.next() {
            let mut value = || {
                args.next()
                    .ok_or_else(|| GameError::Config(format!("missing value for {flag}")))
            };
            match flag.as_str() {
                "--name" => config.player_name = Some(value()?),
                "--seed" => {
                    let raw = value()?;
                    let seed = raw
                        .parse::<u64>()
                        .map_err(|_| GameError::Config(format!("seed must be an integer, got '{raw}'")))?;
                    config.seed = Some(seed);
                }
                "--leaderboard" => config.leaderboard_path = PathBuf::from(value()?),
                "--export" => config.export_path = Some(PathBuf::from(value()?)),
                "--auto" => config.autopilot = Some(value()?),
                other => return Err(GameError::Config(format!("unknown argument '{other}'"))),
            }
        }

        Ok(config)
    }
}

/// `~/.beer-game/beerGameRanking.json`, or the working directory if there is no home.
pub fn default_leaderboard_path() -> PathBuf {
    let file = format!("{LEADERBOARD_KEY}.json");
    match dirs::home_dir() {
        Some(home) => home.join(".beer-game").join(file),
        None => PathBuf::from(file),
    }
}
