// src/exchange/mod.rs

pub mod protocol;
pub mod trade;

pub use protocol::{TradeRules, cheapest_offer, propose, published_offers};
pub use trade::Trade;
