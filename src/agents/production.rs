// src/agents/production.rs

//! The per-round decision stage: what an agent makes, uses up and offers.
//! Only the acting agent's own fields are touched here.

use super::agent::Agent;
use super::agent_kind::OfferRule;
use crate::config::EconomyConfig;
use crate::types::{Good, GoodMap, Offer};

/// What one agent did during its decision stage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DecisionReport {
    pub produced: GoodMap<u32>,
    pub spent: f64,
}

impl DecisionReport {
    /// Folds another agent's report into a round total.
    pub fn absorb(&mut self, other: &DecisionReport) {
        for (good, made) in other.produced.iter() {
            self.produced[good] += *made;
        }
        self.spent += other.spent;
    }
}

/// Runs production, consumption and offer publication for every good.
pub fn decide(agent: &mut Agent, config: &EconomyConfig) -> DecisionReport {
    let behavior = agent.kind.behavior();
    let batch = config.batch_size(agent.kind);
    let mut report = DecisionReport::default();

    for good in Good::ALL {
        if behavior.produces {
            let made = produce(agent, good, batch, config.reprice_step);
            if made > 0 {
                report.produced[good] = made;
                report.spent += agent.cost_to_produce[good];
            }
        }
        if behavior.consumes {
            consume(agent, good, config.consumption_rate, config.valuation_floor);
        }
        publish_offer(agent, good, behavior.offer);
    }
    report
}

/// Manufactures one batch if the price beats the cost and the agent can pay
/// for it. A price under the cost is pushed up instead. Returns units made.
pub fn produce(agent: &mut Agent, good: Good, batch: u32, reprice_step: f64) -> u32 {
    let cost = agent.cost_to_produce[good];
    let price = agent.price[good];

    if price < cost {
        agent.price[good] = price * reprice_step;
        return 0;
    }
    if price > cost && agent.money >= cost {
        agent.money -= cost;
        agent.inventory[good] = agent.inventory[good].saturating_add(batch);
        return batch;
    }
    0
}

pub fn consume(agent: &mut Agent, good: Good, rate: u32, valuation_floor: f64) {
    agent.inventory[good] = agent.inventory[good].saturating_sub(rate);
    agent.refresh_valuation(good, valuation_floor);
}

/// Replaces last round's offer. Nothing is offered from an empty shelf.
pub fn publish_offer(agent: &mut Agent, good: Good, rule: OfferRule) {
    let stock = agent.inventory[good];
    let surplus = match rule {
        OfferRule::AllStock => stock,
        OfferRule::AboveGoal => stock.saturating_sub(agent.goal[good]),
        OfferRule::SingleUnit => 1,
    };
    let quantity = stock.min(surplus);
    let price = agent.price[good];

    agent.offer[good] = if quantity > 0 {
        Offer::new(quantity, price)
    } else {
        Offer::closed(price)
    };
    debug_assert!(agent.offer[good].quantity <= agent.inventory[good]);
}

// -----------------------------------------------------------------------------
//  Unit Tests
// -----------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::AgentKind;

    fn producer(money: f64, price: f64, cost: f64) -> Agent {
        Agent::new(0, AgentKind::Producer, money)
            .with_price(Good::Corn, price)
            .with_cost(Good::Corn, cost)
    }

    #[test]
    fn test_profitable_producer_pays_cost_and_makes_batch() {
        // Arrange
        let mut agent = producer(100.0, 20.0, 10.0);

        // Act
        let made = produce(&mut agent, Good::Corn, 1, 1.1);

        // Assert
        assert_eq!(made, 1);
        assert_eq!(agent.inventory[Good::Corn], 1);
        assert!((agent.money - 90.0).abs() < 1e-9, "Money should drop by the cost.");
        assert_eq!(agent.price[Good::Corn], 20.0, "Profitable price is left alone.");
    }

    #[test]
    fn test_price_below_cost_reprices_without_producing() {
        let mut agent = producer(100.0, 5.0, 10.0);

        let made = produce(&mut agent, Good::Corn, 1, 1.2);

        assert_eq!(made, 0);
        assert_eq!(agent.inventory[Good::Corn], 0);
        assert_eq!(agent.money, 100.0);
        assert!((agent.price[Good::Corn] - 6.0).abs() < 1e-9, "Price should rise by the reprice step.");
    }

    #[test]
    fn test_production_blocked_by_price_and_by_money_independently() {
        // Below cost and broke.
        let mut poor_and_cheap = producer(1.0, 5.0, 10.0);
        assert_eq!(produce(&mut poor_and_cheap, Good::Corn, 1, 1.1), 0);
        assert_eq!(poor_and_cheap.inventory[Good::Corn], 0);

        // Profitable price but cannot afford the cost.
        let mut poor = producer(9.99, 20.0, 10.0);
        assert_eq!(produce(&mut poor, Good::Corn, 1, 1.1), 0);
        assert_eq!(poor.inventory[Good::Corn], 0);
        assert_eq!(poor.money, 9.99, "A blocked producer must not be charged.");

        // Plenty of money but the price does not cover the cost.
        let mut rich = producer(1_000.0, 9.0, 10.0);
        assert_eq!(produce(&mut rich, Good::Corn, 1, 1.1), 0);
        assert_eq!(rich.inventory[Good::Corn], 0);
    }

    #[test]
    fn test_price_equal_to_cost_does_nothing() {
        let mut agent = producer(100.0, 10.0, 10.0);
        assert_eq!(produce(&mut agent, Good::Corn, 1, 1.1), 0);
        assert_eq!(agent.price[Good::Corn], 10.0);
        assert_eq!(agent.money, 100.0);
    }

    #[test]
    fn test_consumption_saturates_and_raises_valuation() {
        let mut agent = Agent::new(0, AgentKind::Consumer, 10.0)
            .with_valuation(Good::Apples, 30.0)
            .with_inventory(Good::Apples, 2);

        consume(&mut agent, Good::Apples, 1, 0.01);
        assert_eq!(agent.inventory[Good::Apples], 1);
        assert!((agent.valuation[Good::Apples] - 15.0).abs() < 1e-9);

        consume(&mut agent, Good::Apples, 5, 0.01);
        assert_eq!(agent.inventory[Good::Apples], 0, "Inventory must not wrap below zero.");
        assert!((agent.valuation[Good::Apples] - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_offer_rules_never_exceed_inventory() {
        let mut agent = Agent::new(0, AgentKind::Consumer, 0.0)
            .with_inventory(Good::Beef, 7)
            .with_goal(Good::Beef, 5)
            .with_price(Good::Beef, 4.0);

        publish_offer(&mut agent, Good::Beef, OfferRule::AboveGoal);
        assert_eq!(agent.offer[Good::Beef], Offer::new(2, 4.0));

        publish_offer(&mut agent, Good::Beef, OfferRule::AllStock);
        assert_eq!(agent.offer[Good::Beef].quantity, 7);

        publish_offer(&mut agent, Good::Beef, OfferRule::SingleUnit);
        assert_eq!(agent.offer[Good::Beef].quantity, 1);
    }

    #[test]
    fn test_empty_shelf_publishes_closed_offer() {
        let mut agent = Agent::new(0, AgentKind::Farmer, 0.0).with_price(Good::Corn, 3.0);
        publish_offer(&mut agent, Good::Corn, OfferRule::SingleUnit);
        assert_eq!(agent.offer[Good::Corn], Offer::closed(3.0));
        assert!(!agent.offer[Good::Corn].is_open());
    }

    #[test]
    fn test_decide_for_consumer_never_produces() {
        let config = EconomyConfig::default();
        let mut agent = Agent::new(0, AgentKind::Consumer, 100.0)
            .with_price(Good::Corn, 50.0)
            .with_inventory(Good::Corn, 3);

        let report = decide(&mut agent, &config);

        assert_eq!(report.produced, GoodMap::splat(0));
        assert_eq!(report.spent, 0.0);
        assert_eq!(agent.inventory[Good::Corn], 2, "Consumers use up one unit per round.");
        assert_eq!(agent.money, 100.0);
    }

    #[test]
    fn test_decide_for_farmer_produces_consumes_and_offers_one_unit() {
        let config = EconomyConfig::default();
        let mut agent = Agent::new(0, AgentKind::Farmer, 100.0)
            .with_price(Good::Corn, 5.0)
            .with_cost(Good::Corn, 2.0)
            .with_price(Good::Apples, 1.0)
            .with_price(Good::Beef, 1.0);

        let report = decide(&mut agent, &config);

        // Batch of two, then one consumed.
        assert_eq!(report.produced[Good::Corn], config.farmer_batch);
        assert_eq!(agent.inventory[Good::Corn], config.farmer_batch - config.consumption_rate);
        assert_eq!(agent.offer[Good::Corn], Offer::new(1, 5.0));
        assert!((report.spent - 2.0).abs() < 1e-9);
        assert!(!agent.offer[Good::Apples].is_open(), "Below-cost goods are not produced.");
    }

    #[test]
    fn test_reports_add_up_to_a_round_total() {
        let mut total = DecisionReport::default();
        total.absorb(&DecisionReport { produced: GoodMap::new([1, 0, 2]), spent: 4.0 });
        total.absorb(&DecisionReport { produced: GoodMap::new([2, 0, 0]), spent: 1.5 });

        assert_eq!(total.produced, GoodMap::new([3, 0, 2]));
        assert!((total.spent - 5.5).abs() < 1e-12);
    }
}
