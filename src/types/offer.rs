// src/types/offer.rs

use serde::{Deserialize, Serialize};

/// What an agent advertises to its neighbours for one good this round.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offer {
    /// Units still available this round. Never above the seller's inventory.
    pub quantity: u32,
    /// Asking price per unit.
    pub price: f64,
}

impl Offer {
    pub fn new(quantity: u32, price: f64) -> Self {
        Self { quantity, price }
    }

    /// Nothing for sale; the price is kept so a renderer can still show it.
    pub fn closed(price: f64) -> Self {
        Self { quantity: 0, price }
    }

    /// An open offer has stock left and a usable price.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.quantity > 0 && self.price > 0.0 && self.price.is_finite()
    }
}
