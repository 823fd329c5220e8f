// src/agents/config.rs

//! A centralized place for the default tuning of agent behaviour.
//! `EconomyConfig::default()` is assembled from these values.

use crate::types::GoodMap;

// --- Population ---
// Ten agents by default, a single farmer among them.
pub const DEFAULT_NUM_CONSUMERS: usize = 7;
pub const DEFAULT_NUM_PRODUCERS: usize = 2;
pub const DEFAULT_NUM_FARMERS: usize = 1;

// --- Topology ---
pub const DEFAULT_CONNECTIVITY_K: usize = 4;
pub const DEFAULT_REWIRE_PROBABILITY: f64 = 0.1;
pub const DEFAULT_TOPOLOGY_MAX_ATTEMPTS: usize = 1_000;

// --- Production (corn, apples, beef) ---
pub const DEFAULT_COST_TO_PRODUCE: GoodMap<f64> = GoodMap::new([2.0, 3.0, 8.0]);
pub const DEFAULT_PRODUCER_BATCH: u32 = 1;
pub const DEFAULT_FARMER_BATCH: u32 = 2;
/// Multiplier applied to a price that sits below the production cost.
/// Must beat one round of decay or an unsold producer never recovers.
pub const DEFAULT_REPRICE_STEP: f64 = 1.2;
/// Jittered costs never drop below this share of the configured cost.
pub const COST_JITTER_FLOOR: f64 = 0.1;

// --- Consumption ---
pub const DEFAULT_CONSUMPTION_RATE: u32 = 1;
/// Marginal utility of the first unit; it falls as 1 / (1 + inventory).
pub const DEFAULT_BASE_VALUATION: GoodMap<f64> = GoodMap::new([12.0, 15.0, 40.0]);
pub const DEFAULT_VALUATION_FLOOR: f64 = 0.01;

// --- Price adaptation ---
pub const DEFAULT_PRICE_GROWTH: f64 = 1.1;
pub const DEFAULT_PRICE_DECAY: f64 = 0.9;
pub const DEFAULT_PRICE_FLOOR: f64 = 0.01;

// --- Initial endowments ---
pub const DEFAULT_MONEY_MIN: f64 = 10.0;
pub const DEFAULT_MONEY_MAX: f64 = 100.0;
pub const DEFAULT_INVENTORY_MAX: u32 = 100;
pub const DEFAULT_PRICE_MIN: f64 = 1.0;
pub const DEFAULT_PRICE_MAX: f64 = 10.0;
pub const DEFAULT_GOAL_MAX: GoodMap<u32> = GoodMap::new([100, 50, 10]);

pub const DEFAULT_SEED: u64 = 42;
