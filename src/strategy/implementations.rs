// src/strategy/implementations.rs

use crate::error::GameError;
use crate::simulation::config::DEFAULT_ORDER;
use crate::strategy::traits::{OrderContext, OrderPolicy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// =========================================================================
// 1. Constant Policy
// =========================================================================

/// Orders the same quantity every week, whatever happens.
#[derive(Debug, Clone)]
pub struct ConstantPolicy {
    quantity: u32,
}

impl ConstantPolicy {
    pub fn new(quantity: u32) -> Self {
        Self { quantity }
    }
}

impl Default for ConstantPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER)
    }
}

impl OrderPolicy for ConstantPolicy {
    fn calculate_order(&mut self, _context: &OrderContext) -> u32 {
        self.quantity
    }
}

// =========================================================================
// 2. Naive Policy (Pass-Through)
// =========================================================================

/// The "Panic" strategy. Produces exactly what customers asked for last week,
/// plus the announced campaign boost. Ignores stock and backlog.
#[derive(Debug, Clone, Default)]
pub struct NaivePolicy;

impl NaivePolicy {
    pub fn new() -> Self {
        Self
    }
}

impl OrderPolicy for NaivePolicy {
    fn calculate_order(&mut self, context: &OrderContext) -> u32 {
        context
            .last_incoming_order
            .saturating_add(context.campaign_boost.unwrap_or(0))
    }
}

// =========================================================================
// 3. Random Policy
// =========================================================================

/// Orders a random amount within a range.
/// Useful as a baseline for how much worse than rational play chaos is.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    min: u32,
    max: u32,
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(min: u32, max: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            min: min.min(max),
            max: min.max(max),
            rng,
        }
    }
}

impl OrderPolicy for RandomPolicy {
    fn calculate_order(&mut self, _context: &OrderContext) -> u32 {
        self.rng.gen_range(self.min..=self.max)
    }
}

// =========================================================================
// 4. Base Stock Policy (Rational / "Order-Up-To")
// =========================================================================

/// Keeps the whole chain's position at a target level.
///
/// Position = retailer stock + pipeline stock - backlog.
/// Order = expected demand + (target - position), never below zero.
#[derive(Debug, Clone)]
pub struct BaseStockPolicy {
    target_stock: i64,
}

impl BaseStockPolicy {
    pub fn new(target_stock: u32) -> Self {
        Self {
            target_stock: target_stock as i64,
        }
    }
}

impl OrderPolicy for BaseStockPolicy {
    fn calculate_order(&mut self, context: &OrderContext) -> u32 {
        let demand = context.last_incoming_order as i64 + context.campaign_boost.unwrap_or(0) as i64;
        let position =
            context.retailer_stock as i64 + context.pipeline_stock as i64 - context.backlog as i64;
        let gap = self.target_stock - position;

        clamp_order(demand + gap)
    }
}

// =========================================================================
// 5. Smoothing Policy
// =========================================================================
// Forecasts demand with exponential smoothing and corrects the chain
// position towards a target, damped by the same factor.

#[derive(Debug, Clone)]
pub struct SmoothingPolicy {
    avg_demand: f64, // Internal state: Forecasting
    gamma: f64,      // Smoothing factor (0.1 = very stable, 0.9 = reactive)
    target_stock: i64,
}

impl SmoothingPolicy {
    pub fn new(initial_demand: f64, gamma: f64, target: u32) -> Self {
        Self {
            avg_demand: initial_demand,
            gamma: gamma.clamp(0.0, 1.0),
            target_stock: target as i64,
        }
    }
}

impl Default for SmoothingPolicy {
    fn default() -> Self {
        Self::new(5.0, 0.3, 24)
    }
}

impl OrderPolicy for SmoothingPolicy {
    fn calculate_order(&mut self, context: &OrderContext) -> u32 {
        // 1. Update Forecast
        let demand = context.last_incoming_order as f64;
        self.avg_demand = (self.gamma * demand) + ((1.0 - self.gamma) * self.avg_demand);

        // 2. Chain position
        let position =
            context.retailer_stock as i64 + context.pipeline_stock as i64 - context.backlog as i64;

        // 3. Order the forecast, nudged towards the target
        let correction = (self.target_stock - position) as f64 * self.gamma;
        let order = self.avg_demand + correction;

        if order < 0.0 {
            0
        } else {
            clamp_order(order.round() as i64)
        }
    }
}

fn clamp_order(raw: i64) -> u32 {
    raw.clamp(0, u32::MAX as i64) as u32
}

/// Builds a policy from text such as `naive`, `constant:6`, `random:0-10`,
/// `base-stock:24` or `smoothing`.
pub fn policy_from_spec(spec: &str, seed: Option<u64>) -> Result<Box<dyn OrderPolicy>, GameError> {
    let (name, arg) = match spec.split_once(':') {
        Some((name, arg)) => (name.trim(), Some(arg.trim())),
        None => (spec.trim(), None),
    };

    let number = |raw: &str| {
        raw.parse::<u32>()
            .map_err(|_| GameError::Config(format!("'{raw}' is not a valid quantity in '{spec}'")))
    };

    let policy: Box<dyn OrderPolicy> = match (name, arg) {
        ("constant", None) => Box::new(ConstantPolicy::default()),
        ("constant", Some(q)) => Box::new(ConstantPolicy::new(number(q)?)),
        ("naive", None) => Box::new(NaivePolicy::new()),
        ("random", None) => Box::new(RandomPolicy::new(0, 10, seed)),
        ("random", Some(range)) => {
            let (lo, hi) = range
                .split_once('-')
                .ok_or_else(|| GameError::Config(format!("expected a range like 0-10 in '{spec}'")))?;
            Box::new(RandomPolicy::new(number(lo)?, number(hi)?, seed))
        }
        ("base-stock", None) => Box::new(BaseStockPolicy::new(24)),
        ("base-stock", Some(t)) => Box::new(BaseStockPolicy::new(number(t)?)),
        ("smoothing", None) => Box::new(SmoothingPolicy::default()),
        ("smoothing", Some(t)) => Box::new(SmoothingPolicy::new(5.0, 0.3, number(t)?)),
        _ => return Err(GameError::Config(format!("unknown policy '{spec}'"))),
    };
    Ok(policy)
}
