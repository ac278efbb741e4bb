// src/model/state.rs

use crate::model::queues::ShipmentPipeline;
use crate::simulation::config::{INITIAL_INCOMING_ORDER, INITIAL_STOCK};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    Retailer,
    Wholesaler,
    Distributor,
    Factory,
}

impl Tier {
    /// Downstream to upstream.
    pub const ALL: [Tier; 4] = [
        Tier::Retailer,
        Tier::Wholesaler,
        Tier::Distributor,
        Tier::Factory,
    ];
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Retailer => "Retailer",
            Tier::Wholesaler => "Wholesaler",
            Tier::Distributor => "Distributor",
            Tier::Factory => "Factory",
        };
        f.write_str(name)
    }
}

/// What the game looked like right after one week's transition.
///
/// Snapshot `n` is produced by week `n`; snapshot 0 seeds the history with
/// the starting values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekSnapshot {
    pub week: u32,
    pub retailer_stock: u32,
    pub incoming_order: u32,
    pub expiring_beer: u32,
    pub backlog: u32,
    /// Orders lost during this week alone.
    pub lost_orders: u32,
}

/// The full game state, owned by whoever drives the weekly loop.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub week: u32,

    // Inventory
    pub retailer_stock: u32,
    pub upstream: ShipmentPipeline,

    // Demand side
    pub backlog: u32,
    pub incoming_order: u32,
    pub expiring_beer: u32,
    pub lost_orders_total: u32,

    // Set by the campaign trigger, cleared by every transition
    pub marketing_campaign_active: bool,
    pub sales_increase: u32,

    pub total_revenue: f64,
    pub total_cost: f64,

    pub history: Vec<WeekSnapshot>,
    /// Weeks in which a marketing campaign was announced.
    pub campaign_weeks: Vec<u32>,
}

impl SimulationState {
    pub fn new() -> Self {
        Self {
            week: 1,
            retailer_stock: INITIAL_STOCK,
            upstream: ShipmentPipeline::new(INITIAL_STOCK),
            backlog: 0,
            incoming_order: INITIAL_INCOMING_ORDER,
            expiring_beer: 0,
            lost_orders_total: 0,
            marketing_campaign_active: false,
            sales_increase: 0,
            total_revenue: 0.0,
            total_cost: 0.0,
            history: vec![WeekSnapshot {
                week: 0,
                retailer_stock: INITIAL_STOCK,
                incoming_order: INITIAL_INCOMING_ORDER,
                expiring_beer: 0,
                backlog: 0,
                lost_orders: 0,
            }],
            campaign_weeks: Vec::new(),
        }
    }

    /// On-hand stock of one tier.
    pub fn stock(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Retailer => self.retailer_stock,
            Tier::Wholesaler => self.upstream.wholesaler(),
            Tier::Distributor => self.upstream.distributor(),
            Tier::Factory => self.upstream.factory(),
        }
    }

    pub fn wholesaler_stock(&self) -> u32 {
        self.upstream.wholesaler()
    }

    pub fn distributor_stock(&self) -> u32 {
        self.upstream.distributor()
    }

    pub fn factory_stock(&self) -> u32 {
        self.upstream.factory()
    }

    pub fn profit(&self) -> f64 {
        self.total_revenue - self.total_cost
    }

    /// Backlog recorded by `week`'s transition, if that week has happened.
    pub fn backlog_at(&self, week: u32) -> Option<u32> {
        self.history.get(week as usize).map(|snapshot| snapshot.backlog)
    }

    pub fn had_campaign(&self, week: u32) -> bool {
        self.campaign_weeks.contains(&week)
    }

    // Column views over the history, one value per elapsed week.

    pub fn retailer_series(&self) -> Vec<u32> {
        self.history.iter().map(|s| s.retailer_stock).collect()
    }

    pub fn incoming_order_series(&self) -> Vec<u32> {
        self.history.iter().map(|s| s.incoming_order).collect()
    }

    pub fn expiring_beer_series(&self) -> Vec<u32> {
        self.history.iter().map(|s| s.expiring_beer).collect()
    }

    pub fn backlog_series(&self) -> Vec<u32> {
        self.history.iter().map(|s| s.backlog).collect()
    }

    pub fn lost_orders_series(&self) -> Vec<u32> {
        self.history.iter().map(|s| s.lost_orders).collect()
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}
