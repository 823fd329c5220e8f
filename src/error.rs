// src/error.rs

use crate::types::Good;
use thiserror::Error;

/// Reasons a trade network cannot be built. All of them are fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopologyError {
    #[error("a trade network needs at least one node")]
    EmptyGraph,

    #[error("connectivity k={k} exceeds the number of nodes n={n}")]
    DegreeExceedsNodes { n: usize, k: usize },

    #[error("connectivity k={k} leaves the {n} nodes without lattice edges (need k >= 2)")]
    DegreeTooSmall { n: usize, k: usize },

    #[error("rewire probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("edge ({from}, {to}) is not valid for a graph of {n} nodes")]
    InvalidEdge { from: usize, to: usize, n: usize },

    #[error("no connected graph found after {attempts} attempts")]
    Disconnected { attempts: usize },
}

/// Rejected simulation parameters, reported by `Economy::new`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("the economy needs at least one agent")]
    NoAgents,

    #[error("cost to produce {good} must be finite and non-negative, got {cost}")]
    InvalidCost { good: Good, cost: f64 },

    #[error("base valuation of {good} must be finite and positive, got {value}")]
    InvalidValuation { good: Good, value: f64 },

    #[error("{name} is out of range: {value}")]
    InvalidFactor { name: &'static str, value: f64 },

    #[error("reprice step {reprice_step} does not outpace price decay {price_decay}")]
    RepriceBelowDecay { reprice_step: f64, price_decay: f64 },

    #[error("{name} range is invalid: [{min}, {max}]")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{name} must be at least 1")]
    ZeroQuantity { name: &'static str },

    #[error("agent list does not match the topology: {agents} agents for {nodes} nodes")]
    PopulationMismatch { agents: usize, nodes: usize },

    #[error("agent at position {position} claims id {id}")]
    MisplacedAgent { position: usize, id: usize },

    #[error("invalid configuration file: {0}")]
    Parse(String),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Why a proposed trade could not be settled. Expected under contention: an
/// earlier buyer may already have drained the seller's offer this round.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettlementError {
    #[error("a trade must move at least one unit")]
    ZeroQuantity,

    #[error("agent {seller} offers only {available} {good}, trade asked for {requested}")]
    OfferDepleted {
        seller: usize,
        good: Good,
        requested: u32,
        available: u32,
    },

    #[error("agent {seller} holds only {available} {good}, trade asked for {requested}")]
    InsufficientInventory {
        seller: usize,
        good: Good,
        requested: u32,
        available: u32,
    },

    #[error("agent {buyer} cannot pay {cost:.2} with {money:.2}")]
    InsufficientFunds { buyer: usize, cost: f64, money: f64 },

    #[error("agent {0} cannot trade with itself")]
    SelfTrade(usize),

    #[error("agent {0} does not exist")]
    UnknownAgent(usize),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
