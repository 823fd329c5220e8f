// src/lib.rs

//! A decentralised barter economy on a small-world network: agents make,
//! use and trade goods with their neighbours, and prices drift with demand.

// === 1. Declare all the top-level modules ===
pub mod agents;
pub mod config;
pub mod error;
pub mod exchange;
pub mod metrics;
pub mod network;
pub mod pricing;
pub mod simulators;
pub mod snapshot;
pub mod types;

// === 2. Re-export the public-facing components to create a clean API ===

// --- From `agents` ---
pub use agents::{Agent, AgentKind};

// --- Configuration & errors ---
pub use config::{DemandRule, EconomyConfig, Endowment, PartnerSelection};
pub use error::{ConfigError, SettlementError, TopologyError};

// --- From `exchange` ---
pub use exchange::{Trade, TradeRules};

// --- From `network` ---
pub use network::Topology;

// --- From `pricing` ---
pub use pricing::PriceAdaptation;

// --- From `simulators` ---
pub use simulators::{Economy, RoundPhase, Simulation};

// --- Read-only outputs ---
pub use metrics::{PriceStats, RoundMetrics};
pub use snapshot::{AgentSnapshot, Snapshot};

// --- From `types` ---
pub use types::{Good, GoodMap, Offer};
