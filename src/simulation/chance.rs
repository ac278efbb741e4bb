// src/simulation/chance.rs

use crate::error::GameError;
use crate::simulation::config::{CAMPAIGN_PROBABILITY, MAX_BASE_DEMAND, MAX_SALES_INCREASE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Bernoulli, Distribution, Uniform};
use std::collections::VecDeque;

/// Every random draw the game makes.
///
/// The engine never touches a generator directly, so a game can be replayed
/// exactly by feeding it the same draws.
pub trait ChanceSource {
    /// Customer demand before any campaign boost, `0..=MAX_BASE_DEMAND`.
    fn base_demand(&mut self) -> u32;

    /// Whether marketing announces a campaign this week.
    fn campaign_roll(&mut self) -> bool;

    /// Size of an announced campaign's boost, `1..=MAX_SALES_INCREASE`.
    fn sales_increase(&mut self) -> u32;
}

/// Draws from a real random number generator.
#[derive(Debug, Clone)]
pub struct RandomChance<R> {
    rng: R,
    demand: Uniform<u32>,
    campaign: Bernoulli,
    boost: Uniform<u32>,
}

impl<R: Rng> RandomChance<R> {
    pub fn new(rng: R) -> Result<Self, GameError> {
        let campaign = Bernoulli::new(CAMPAIGN_PROBABILITY)
            .map_err(|e| GameError::Config(format!("campaign probability: {e}")))?;
        Ok(Self {
            rng,
            demand: Uniform::new_inclusive(0, MAX_BASE_DEMAND),
            campaign,
            boost: Uniform::new_inclusive(1, MAX_SALES_INCREASE),
        })
    }
}

impl RandomChance<StdRng> {
    /// Seeded when `seed` is given, otherwise from OS entropy.
    pub fn from_seed(seed: Option<u64>) -> Result<Self, GameError> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng)
    }
}

impl<R: Rng> ChanceSource for RandomChance<R> {
    fn base_demand(&mut self) -> u32 {
        self.demand.sample(&mut self.rng)
    }

    fn campaign_roll(&mut self) -> bool {
        self.campaign.sample(&mut self.rng)
    }

    fn sales_increase(&mut self) -> u32 {
        self.boost.sample(&mut self.rng)
    }
}

/// Replays pre-recorded draws.
///
/// When a queue runs dry it falls back to a quiet default: zero demand and
/// no campaign.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChance {
    demands: VecDeque<u32>,
    campaign_rolls: VecDeque<bool>,
    increases: VecDeque<u32>,
}

impl ScriptedChance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_demands(mut self, demands: impl IntoIterator<Item = u32>) -> Self {
        self.demands.extend(demands);
        self
    }

    /// Queues one campaign decision; `Some(boost)` announces a campaign.
    pub fn with_campaign(mut self, boost: Option<u32>) -> Self {
        self.campaign_rolls.push_back(boost.is_some());
        if let Some(boost) = boost {
            self.increases.push_back(boost);
        }
        self
    }

    pub fn remaining_demands(&self) -> usize {
        self.demands.len()
    }
}

impl ChanceSource for ScriptedChance {
    fn base_demand(&mut self) -> u32 {
        self.demands.pop_front().unwrap_or(0)
    }

    fn campaign_roll(&mut self) -> bool {
        self.campaign_rolls.pop_front().unwrap_or(false)
    }

    fn sales_increase(&mut self) -> u32 {
        self.increases.pop_front().unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_draws_stay_in_range() {
        let mut chance = RandomChance::from_seed(Some(7)).unwrap();
        for _ in 0..2_000 {
            assert!(chance.base_demand() <= MAX_BASE_DEMAND);
            let boost = chance.sales_increase();
            assert!((1..=MAX_SALES_INCREASE).contains(&boost));
        }
    }

    #[test]
    fn test_random_draws_cover_the_whole_range() {
        let mut chance = RandomChance::from_seed(Some(11)).unwrap();
        let mut seen = [false; (MAX_BASE_DEMAND + 1) as usize];
        for _ in 0..5_000 {
            seen[chance.base_demand() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_campaign_roll_is_roughly_a_coin_flip() {
        let mut chance = RandomChance::from_seed(Some(3)).unwrap();
        let hits = (0..10_000).filter(|_| chance.campaign_roll()).count();
        assert!((4_500..5_500).contains(&hits), "hits = {hits}");
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = RandomChance::from_seed(Some(99)).unwrap();
        let mut b = RandomChance::from_seed(Some(99)).unwrap();
        for _ in 0..100 {
            assert_eq!(a.base_demand(), b.base_demand());
            assert_eq!(a.campaign_roll(), b.campaign_roll());
        }
    }

    #[test]
    fn test_scripted_replays_then_goes_quiet() {
        let mut chance = ScriptedChance::new()
            .with_demands([10, 3])
            .with_campaign(None)
            .with_campaign(Some(2));

        assert_eq!(chance.base_demand(), 10);
        assert_eq!(chance.base_demand(), 3);
        assert_eq!(chance.base_demand(), 0);
        assert!(!chance.campaign_roll());
        assert!(chance.campaign_roll());
        assert_eq!(chance.sales_increase(), 2);
        assert!(!chance.campaign_roll());
    }
}
