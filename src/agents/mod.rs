// src/agents/mod.rs

pub mod agent;
pub mod agent_kind;
pub mod config;
pub mod endowment;
pub mod production;

pub use agent::Agent;
pub use agent_kind::{AgentKind, Behavior, BidBasis, OfferRule};
pub use endowment::spawn_population;
pub use production::{DecisionReport, decide};
