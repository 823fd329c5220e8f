// src/exchange/trade.rs

use crate::agents::Agent;
use crate::error::SettlementError;
use crate::types::Good;
use serde::Serialize;

/// A bilateral exchange agreed between a buyer and one of its neighbours.
///
/// Proposing a trade only reads agent state. Nothing moves until the
/// scheduler calls [`Trade::settle`], which re-checks the seller's offer
/// and stock and the buyer's funds against the live state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trade {
    pub buyer: usize,
    pub seller: usize,
    pub good: Good,
    pub quantity: u32,
    pub unit_price: f64,
}

impl Trade {
    #[inline]
    pub fn cost(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }

    /// Moves goods and money between the two parties, or changes nothing.
    pub fn settle(&self, agents: &mut [Agent]) -> Result<(), SettlementError> {
        if self.quantity == 0 {
            return Err(SettlementError::ZeroQuantity);
        }
        if self.buyer == self.seller {
            return Err(SettlementError::SelfTrade(self.buyer));
        }
        for id in [self.buyer, self.seller] {
            if id >= agents.len() {
                return Err(SettlementError::UnknownAgent(id));
            }
        }

        let (buyer, seller) = pair_mut(agents, self.buyer, self.seller);
        let good = self.good;
        let quantity = self.quantity;

        let available = seller.offer[good].quantity;
        if available < quantity {
            return Err(SettlementError::OfferDepleted {
                seller: seller.id,
                good,
                requested: quantity,
                available,
            });
        }
        let held = seller.inventory[good];
        if held < quantity {
            return Err(SettlementError::InsufficientInventory {
                seller: seller.id,
                good,
                requested: quantity,
                available: held,
            });
        }
        let cost = self.cost();
        if cost > buyer.money {
            return Err(SettlementError::InsufficientFunds {
                buyer: buyer.id,
                cost,
                money: buyer.money,
            });
        }

        buyer.inventory[good] += quantity;
        buyer.money -= cost;
        seller.inventory[good] -= quantity;
        seller.money += cost;
        seller.sales[good] += quantity;
        seller.offer[good].quantity -= quantity;
        Ok(())
    }
}

/// Two distinct agents borrowed mutably at once. Callers check `a != b`.
fn pair_mut(agents: &mut [Agent], a: usize, b: usize) -> (&mut Agent, &mut Agent) {
    if a < b {
        let (low, high) = agents.split_at_mut(b);
        (&mut low[a], &mut high[0])
    } else {
        let (low, high) = agents.split_at_mut(a);
        (&mut high[0], &mut low[b])
    }
}
