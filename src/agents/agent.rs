// src/agents/agent.rs

use super::agent_kind::{AgentKind, BidBasis};
use super::config::{DEFAULT_BASE_VALUATION, DEFAULT_COST_TO_PRODUCE};
use crate::types::{Good, GoodMap, Offer};

/// One participant of the economy, resident on the node with the same index.
///
/// Only the agent's own decision stage and the scheduler's settlement step
/// ever write to these fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub id: usize,
    pub kind: AgentKind,
    pub money: f64,
    pub inventory: GoodMap<u32>,
    /// Holdings the agent is trying to reach; drives how much it buys.
    pub goal: GoodMap<u32>,
    /// Marginal utility at zero inventory.
    pub base_valuation: GoodMap<f64>,
    pub valuation: GoodMap<f64>,
    /// Reference ask/bid price, moved only by repricing and adaptation.
    pub price: GoodMap<f64>,
    pub cost_to_produce: GoodMap<f64>,
    pub offer: GoodMap<Offer>,
    /// Units sold since the last price adaptation.
    pub sales: GoodMap<u32>,
}

impl Agent {
    /// An agent with empty stock, unit prices and the default cost and
    /// valuation tables. Use the `with_*` setters to shape a scenario.
    pub fn new(id: usize, kind: AgentKind, money: f64) -> Self {
        Self {
            id,
            kind,
            money,
            inventory: GoodMap::splat(0),
            goal: GoodMap::splat(0),
            base_valuation: DEFAULT_BASE_VALUATION,
            valuation: DEFAULT_BASE_VALUATION,
            price: GoodMap::splat(1.0),
            cost_to_produce: DEFAULT_COST_TO_PRODUCE,
            offer: GoodMap::splat(Offer::closed(1.0)),
            sales: GoodMap::splat(0),
        }
    }

    pub fn with_inventory(mut self, good: Good, quantity: u32) -> Self {
        self.inventory[good] = quantity;
        self
    }

    pub fn with_goal(mut self, good: Good, quantity: u32) -> Self {
        self.goal[good] = quantity;
        self
    }

    pub fn with_price(mut self, good: Good, price: f64) -> Self {
        self.price[good] = price;
        self
    }

    pub fn with_cost(mut self, good: Good, cost: f64) -> Self {
        self.cost_to_produce[good] = cost;
        self
    }

    /// Sets the zero-inventory valuation and the current valuation together.
    pub fn with_valuation(mut self, good: Good, value: f64) -> Self {
        self.base_valuation[good] = value;
        self.valuation[good] = value;
        self
    }

    pub fn with_offer(mut self, good: Good, offer: Offer) -> Self {
        self.offer[good] = offer;
        self
    }

    /// The node this agent lives on. Fixed for the whole run.
    #[inline]
    pub fn node(&self) -> usize {
        self.id
    }

    /// Scarcity pricing: value falls with every unit already held.
    pub fn refresh_valuation(&mut self, good: Good, floor: f64) {
        let held = f64::from(self.inventory[good]);
        self.valuation[good] = (self.base_valuation[good] / (1.0 + held)).max(floor);
    }

    /// The price an offer must strictly undercut for this agent to buy.
    pub fn willingness_to_pay(&self, good: Good) -> f64 {
        match self.kind.behavior().bid {
            BidBasis::Price => self.price[good],
            BidBasis::Valuation => self.valuation[good],
        }
    }
}
