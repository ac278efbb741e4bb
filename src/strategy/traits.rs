// src/strategy/traits.rs

use crate::model::state::SimulationState;
use std::fmt::Debug;

/// What an automated player can see when it decides the factory's order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderContext {
    pub week: u32,
    pub retailer_stock: u32,
    /// Units held by wholesaler, distributor and factory together.
    pub pipeline_stock: u64,
    pub backlog: u32,
    /// Customer demand seen last week, including any campaign boost.
    pub last_incoming_order: u32,
    /// Boost announced for this week, if a campaign is running.
    pub campaign_boost: Option<u32>,
}

impl OrderContext {
    pub fn from_state(state: &SimulationState) -> Self {
        Self {
            week: state.week,
            retailer_stock: state.retailer_stock,
            pipeline_stock: state.upstream.total(),
            backlog: state.backlog,
            last_incoming_order: state.incoming_order,
            campaign_boost: state
                .marketing_campaign_active
                .then_some(state.sales_increase),
        }
    }
}

/// Decides how much the factory should produce this week.
///
/// We require `Debug` so a policy can be printed next to its results.
pub trait OrderPolicy: Debug + Send {
    fn calculate_order(&mut self, context: &OrderContext) -> u32;
}
