// src/simulation/engine.rs

use crate::error::GameError;
use crate::model::order::FactoryOrder;
use crate::model::state::{SimulationState, WeekSnapshot};
use crate::simulation::chance::ChanceSource;
use crate::simulation::config::{
    BACKLOG_LIMIT, BEER_PRICE, CAMPAIGN_INTERVAL, SPOILAGE_PERCENT, STORAGE_COST, WEEK_LIMIT,
};
use crate::strategy::traits::{OrderContext, OrderPolicy};
use tracing::{debug, info};

/// The state every game starts from.
pub fn initial_state() -> SimulationState {
    SimulationState::new()
}

/// Gives marketing its chance to announce a campaign.
///
/// Only weeks divisible by `CAMPAIGN_INTERVAL` are eligible, and then only
/// half the time. Must run once per week, before the player orders; the
/// boost is consumed by the next [`advance`]. Returns the boost if a
/// campaign was announced.
pub fn maybe_trigger_campaign<C>(state: &mut SimulationState, chance: &mut C) -> Option<u32>
where
    C: ChanceSource + ?Sized,
{
    if state.week % CAMPAIGN_INTERVAL != 0 || !chance.campaign_roll() {
        return None;
    }

    let boost = chance.sales_increase();
    state.marketing_campaign_active = true;
    state.sales_increase = boost;
    state.campaign_weeks.push(state.week);

    info!(week = state.week, boost, "marketing campaign announced");
    Some(boost)
}

/// Plays one week and returns the resulting state.
///
/// `player_order` is what the factory starts producing this week. Fails with
/// [`GameError::GameAlreadyTerminal`] once the week limit is reached; the
/// given state is never modified.
pub fn advance<C>(
    state: &SimulationState,
    player_order: u32,
    chance: &mut C,
) -> Result<SimulationState, GameError>
where
    C: ChanceSource + ?Sized,
{
    if state.week >= WEEK_LIMIT {
        return Err(GameError::GameAlreadyTerminal { week: state.week });
    }
    let week = state.week;

    // =================================================================
    // PHASE 1: Customer demand
    // =================================================================
    let campaign_boost = if state.marketing_campaign_active {
        state.sales_increase
    } else {
        0
    };
    let incoming_order = chance.base_demand().saturating_add(campaign_boost);
    // Last week's backlog is still owed.
    let total_demand = incoming_order.saturating_add(state.backlog);

    let sold = state.retailer_stock.min(total_demand);
    let revenue = sold as f64 * BEER_PRICE;

    // =================================================================
    // PHASE 2: Stock moves one tier downstream
    // =================================================================
    let mut upstream = state.upstream.clone();
    let arrival = upstream.advance(player_order);
    let shipped_in = (state.retailer_stock - sold).saturating_add(arrival);
    let backlog = total_demand - sold;

    // =================================================================
    // PHASE 3: Spoilage, lost orders, storage
    // =================================================================
    let expiring_beer = (u64::from(shipped_in) * u64::from(SPOILAGE_PERCENT) / 100) as u32;

    let lost_this_week = if week >= BACKLOG_LIMIT {
        state.backlog_at(week - BACKLOG_LIMIT).unwrap_or(0)
    } else {
        0
    };

    // Storage is charged on pre-spoilage stock.
    let storage_cost = (u64::from(shipped_in) + upstream.total()) as f64 * STORAGE_COST;

    let retailer_stock = shipped_in.saturating_sub(expiring_beer);

    debug!(
        week,
        incoming_order,
        sold,
        backlog,
        expiring_beer,
        lost_this_week,
        "week played"
    );

    // =================================================================
    // PHASE 4: Record & advance
    // =================================================================
    let mut history = state.history.clone();
    history.push(WeekSnapshot {
        week,
        retailer_stock,
        incoming_order,
        expiring_beer,
        backlog,
        lost_orders: lost_this_week,
    });

    let next = SimulationState {
        week: week + 1,
        retailer_stock,
        upstream,
        backlog,
        incoming_order,
        expiring_beer,
        lost_orders_total: state.lost_orders_total.saturating_add(lost_this_week),
        marketing_campaign_active: false,
        sales_increase: 0,
        total_revenue: state.total_revenue + revenue,
        total_cost: state.total_cost + storage_cost,
        history,
        campaign_weeks: state.campaign_weeks.clone(),
    };

    if week % 5 == 0 {
        info!(
            "Week {}: Retailer stock: {}, Backlog: {}, Profit: ${:.2}",
            week,
            next.retailer_stock,
            next.backlog,
            next.profit()
        );
    }

    Ok(next)
}

/// Result of one player action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurnOutcome {
    /// The week was played; `week` is the new current week.
    Advanced { week: u32 },
    /// The order closed the game. `score` is the final profit.
    GameOver { score: f64 },
}

/// One player's game from week 1 to the final order.
///
/// Wraps the pure transition functions with the bookkeeping a driver needs:
/// the campaign check runs exactly once per week, and an order placed on the
/// final week closes the game instead of advancing it.
#[derive(Debug)]
pub struct GameSession<C> {
    state: SimulationState,
    chance: C,
    campaign_checked_for: Option<u32>,
    finished: bool,
}

impl<C: ChanceSource> GameSession<C> {
    pub fn new(chance: C) -> Self {
        Self {
            state: initial_state(),
            chance,
            campaign_checked_for: None,
            finished: false,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn into_state(self) -> SimulationState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Runs this week's campaign check if it has not run yet.
    ///
    /// Returns the boost of the campaign running this week, if any.
    pub fn begin_week(&mut self) -> Option<u32> {
        if !self.finished && self.campaign_checked_for != Some(self.state.week) {
            self.campaign_checked_for = Some(self.state.week);
            maybe_trigger_campaign(&mut self.state, &mut self.chance);
        }
        self.state
            .marketing_campaign_active
            .then_some(self.state.sales_increase)
    }

    pub fn place_order(&mut self, order: FactoryOrder) -> Result<TurnOutcome, GameError> {
        if self.finished {
            return Err(GameError::GameAlreadyTerminal {
                week: self.state.week,
            });
        }

        if self.state.week >= WEEK_LIMIT {
            self.finished = true;
            let score = self.state.profit();
            info!(week = self.state.week, score, "game over");
            return Ok(TurnOutcome::GameOver { score });
        }

        self.begin_week();
        self.state = advance(&self.state, order.quantity(), &mut self.chance)?;
        Ok(TurnOutcome::Advanced {
            week: self.state.week,
        })
    }

    /// Lets a policy play every remaining week. Returns the final score.
    pub fn play_with(&mut self, policy: &mut dyn OrderPolicy) -> Result<f64, GameError> {
        loop {
            self.begin_week();
            let context = OrderContext::from_state(&self.state);
            let order = FactoryOrder::new(policy.calculate_order(&context));
            if let TurnOutcome::GameOver { score } = self.place_order(order)? {
                return Ok(score);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::chance::ScriptedChance;
    use crate::simulation::config::INITIAL_STOCK;

    #[test]
    fn test_initial_state() {
        let state = initial_state();
        assert_eq!(state.week, 1);
        assert_eq!(state.retailer_stock, INITIAL_STOCK);
        assert_eq!(state.wholesaler_stock(), INITIAL_STOCK);
        assert_eq!(state.distributor_stock(), INITIAL_STOCK);
        assert_eq!(state.factory_stock(), INITIAL_STOCK);
        assert_eq!(state.backlog, 0);
        assert_eq!(state.incoming_order, 4);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn test_first_week_with_demand_of_ten() {
        let mut chance = ScriptedChance::new().with_demands([10]);
        let next = advance(&initial_state(), 4, &mut chance).unwrap();

        assert_eq!(next.week, 2);
        assert_eq!(next.incoming_order, 10);
        assert_eq!(next.backlog, 2);
        assert_eq!(next.retailer_stock, 8);
        assert_eq!(next.expiring_beer, 0);
        assert_eq!(next.total_revenue, 40.0);
        assert_eq!(next.wholesaler_stock(), 8);
        assert_eq!(next.distributor_stock(), 8);
        assert_eq!(next.factory_stock(), 4);
        // (8 + 8 + 8 + 4) * 0.5
        assert_eq!(next.total_cost, 14.0);
        assert_eq!(next.lost_orders_total, 0);
    }

    #[test]
    fn test_spoilage_is_charged_storage_but_not_reported() {
        // Sell nothing: retailer gets 8 + 8 = 16, 1 unit spoils.
        let mut chance = ScriptedChance::new().with_demands([0]);
        let next = advance(&initial_state(), 0, &mut chance).unwrap();

        assert_eq!(next.expiring_beer, 1);
        assert_eq!(next.retailer_stock, 15);
        assert_eq!(next.history[1].retailer_stock, 15);
        // Storage on 16 + 8 + 8 + 0, not on 15.
        assert_eq!(next.total_cost, 16.0);
    }

    #[test]
    fn test_campaign_only_on_eligible_weeks() {
        let mut state = initial_state();
        let mut chance = ScriptedChance::new().with_campaign(Some(3));
        assert_eq!(maybe_trigger_campaign(&mut state, &mut chance), None);
        assert!(!state.marketing_campaign_active);

        state.week = 4;
        assert_eq!(maybe_trigger_campaign(&mut state, &mut chance), Some(3));
        assert!(state.marketing_campaign_active);
        assert_eq!(state.sales_increase, 3);
        assert_eq!(state.campaign_weeks, vec![4]);
    }

    #[test]
    fn test_campaign_miss_leaves_defaults() {
        let mut state = initial_state();
        state.week = 8;
        let mut chance = ScriptedChance::new().with_campaign(None);
        assert_eq!(maybe_trigger_campaign(&mut state, &mut chance), None);
        assert!(!state.marketing_campaign_active);
        assert_eq!(state.sales_increase, 0);
        assert!(state.campaign_weeks.is_empty());
    }

    #[test]
    fn test_campaign_boost_is_added_then_cleared() {
        let mut state = initial_state();
        state.week = 4;
        let seed = state.history[0];
        state
            .history
            .extend((1..4).map(|week| WeekSnapshot { week, ..seed }));
        let mut chance = ScriptedChance::new()
            .with_campaign(Some(2))
            .with_demands([5]);

        maybe_trigger_campaign(&mut state, &mut chance);
        let next = advance(&state, 4, &mut chance).unwrap();

        assert_eq!(next.incoming_order, 7);
        assert!(!next.marketing_campaign_active);
        assert_eq!(next.sales_increase, 0);
        assert_eq!(next.campaign_weeks, vec![4]);
    }

    #[test]
    fn test_oversized_campaign_boost_saturates() {
        let mut state = initial_state();
        state.week = 4;
        let seed = state.history[0];
        state
            .history
            .extend((1..4).map(|week| WeekSnapshot { week, ..seed }));
        let mut chance = ScriptedChance::new()
            .with_campaign(Some(u32::MAX))
            .with_demands([5]);

        maybe_trigger_campaign(&mut state, &mut chance);
        let next = advance(&state, 4, &mut chance).unwrap();

        assert_eq!(next.incoming_order, u32::MAX);
        assert_eq!(next.backlog, u32::MAX - INITIAL_STOCK);
    }

    #[test]
    fn test_advance_refuses_at_week_limit() {
        let mut state = initial_state();
        state.week = WEEK_LIMIT;
        let before = state.clone();
        let mut chance = ScriptedChance::new().with_demands([3]);

        let err = advance(&state, 4, &mut chance).unwrap_err();
        assert!(matches!(err, GameError::GameAlreadyTerminal { week: WEEK_LIMIT }));
        assert_eq!(state, before);
        // No draw was consumed.
        assert_eq!(chance.remaining_demands(), 1);
    }

    #[test]
    fn test_session_ends_on_final_week_order() {
        let mut session = GameSession::new(ScriptedChance::new());
        for _ in 1..WEEK_LIMIT {
            let outcome = session.place_order(FactoryOrder::new(4)).unwrap();
            assert!(matches!(outcome, TurnOutcome::Advanced { .. }));
        }
        assert_eq!(session.state().week, WEEK_LIMIT);
        assert!(!session.is_finished());

        let before = session.state().clone();
        let outcome = session.place_order(FactoryOrder::new(4)).unwrap();
        assert_eq!(
            outcome,
            TurnOutcome::GameOver {
                score: before.profit()
            }
        );
        assert!(session.is_finished());
        assert_eq!(session.state(), &before);

        let err = session.place_order(FactoryOrder::new(4)).unwrap_err();
        assert!(matches!(err, GameError::GameAlreadyTerminal { .. }));
    }

    #[test]
    fn test_begin_week_checks_campaign_once() {
        let mut session = GameSession::new(
            ScriptedChance::new()
                .with_campaign(None)
                .with_campaign(Some(1)),
        );
        for _ in 1..4 {
            session.place_order(FactoryOrder::new(4)).unwrap();
        }
        assert_eq!(session.state().week, 4);
        // First roll misses; calling again must not reroll.
        assert_eq!(session.begin_week(), None);
        assert_eq!(session.begin_week(), None);
        session.place_order(FactoryOrder::new(4)).unwrap();
        assert!(session.state().campaign_weeks.is_empty());
    }
}
