// src/exchange/protocol.rs

//! The bilateral exchange rule: a buyer looks at one neighbour's offer and
//! decides how much, if anything, to take. Only the buyer ever evaluates;
//! the seller never looks back within the same call.

use super::trade::Trade;
use crate::agents::Agent;
use crate::config::{DemandRule, EconomyConfig};
use crate::types::{Good, GoodMap, Offer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TradeRules {
    pub demand: DemandRule,
    /// Retail-style limit on units per match.
    pub cap: Option<u32>,
}

impl TradeRules {
    pub fn from_config(config: &EconomyConfig) -> Self {
        Self {
            demand: config.demand_rule,
            cap: config.per_transaction_cap,
        }
    }
}

/// Units the buyer still wants of `good`.
pub fn residual_demand(buyer: &Agent, good: Good, rule: DemandRule) -> u32 {
    let held = buyer.inventory[good];
    match rule {
        DemandRule::GoalGap => buyer.goal[good].saturating_sub(held),
        // `as` saturates, so a huge valuation cannot wrap.
        DemandRule::ValuationGap => (buyer.valuation[good].floor() as u32).saturating_sub(held),
        DemandRule::SingleUnit => 1,
    }
}

/// Whole units of `price` that `money` covers.
pub fn affordable_units(money: f64, price: f64) -> u32 {
    if !(price > 0.0 && price.is_finite()) || !(money > 0.0) {
        return 0;
    }
    (money / price).floor() as u32
}

/// Every agent's offers as published at the end of the decision stage.
/// Buyers shop against this board for the whole trading pass, so an offer
/// may already be sold out by the time a trade against it settles.
pub fn published_offers(agents: &[Agent]) -> Vec<GoodMap<Offer>> {
    agents.iter().map(|a| a.offer).collect()
}

/// An offer clears when it is open and strictly undercuts the buyer.
pub fn clears(buyer: &Agent, offer: Offer, good: Good) -> bool {
    offer.is_open() && offer.price < buyer.willingness_to_pay(good)
}

/// The trade `buyer` would make against `seller`'s published `offer` for
/// `good`, or `None` when the price does not clear or the quantity comes
/// out at zero. Demand and budget are read from the buyer's live state.
pub fn propose(buyer: &Agent, seller: usize, offer: Offer, good: Good, rules: TradeRules) -> Option<Trade> {
    if buyer.id == seller || !clears(buyer, offer, good) {
        return None;
    }

    let mut quantity = offer
        .quantity
        .min(residual_demand(buyer, good, rules.demand))
        .min(affordable_units(buyer.money, offer.price));
    if let Some(cap) = rules.cap {
        quantity = quantity.min(cap);
    }
    // Guard the last unit against rounding in money / price.
    while quantity > 0 && f64::from(quantity) * offer.price > buyer.money {
        quantity -= 1;
    }
    if quantity == 0 {
        return None;
    }

    Some(Trade {
        buyer: buyer.id,
        seller,
        good,
        quantity,
        unit_price: offer.price,
    })
}

/// The neighbour with the lowest clearing offer for `good` on the board.
/// `neighbors` is expected in this round's shuffled order; ties go to the
/// earlier one.
pub fn cheapest_offer(buyer: &Agent, board: &[GoodMap<Offer>], neighbors: &[usize], good: Good) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for &seller in neighbors {
        let offer = board[seller][good];
        if !clears(buyer, offer, good) {
            continue;
        }
        match best {
            Some((_, lowest)) if offer.price >= lowest => {}
            _ => best = Some((seller, offer.price)),
        }
    }
    best.map(|(seller, _)| seller)
}
