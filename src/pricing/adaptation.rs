// src/pricing/adaptation.rs

use crate::agents::Agent;
use crate::config::EconomyConfig;

/// Multiplicative hill-climbing toward a clearing price: anything sold this
/// round pushes the price up, an unsold good lets it drift down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceAdaptation {
    /// Applied after at least one sale (> 1).
    pub growth: f64,
    /// Applied when nothing sold (in (0, 1)).
    pub decay: f64,
    /// Prices never fall below this, so they cannot collapse to zero.
    pub floor: f64,
}

impl PriceAdaptation {
    pub fn from_config(config: &EconomyConfig) -> Self {
        Self {
            growth: config.price_growth,
            decay: config.price_decay,
            floor: config.price_floor,
        }
    }

    #[inline]
    pub fn next_price(&self, price: f64, sold: u32) -> f64 {
        let factor = if sold > 0 { self.growth } else { self.decay };
        (price * factor).max(self.floor)
    }

    /// Updates every price of `agent` and clears its sales counters.
    pub fn apply(&self, agent: &mut Agent) {
        for (good, sold) in agent.sales.iter_mut() {
            agent.price[good] = self.next_price(agent.price[good], *sold);
            *sold = 0;
        }
    }
}
