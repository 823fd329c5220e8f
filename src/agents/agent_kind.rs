// src/agents/agent_kind.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// The behavioural variant of an agent. Every agent shares the same record;
/// the kind only selects rows of the behaviour table below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Uses goods up every round and buys by marginal utility.
    Consumer,
    /// Manufactures goods when the price covers the cost, sells all stock.
    Producer,
    /// Hybrid: manufactures, consumes and retails one unit at a time.
    Farmer,
}

/// Which number a buyer compares an offer price against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidBasis {
    Price,
    Valuation,
}

/// How much of its stock an agent puts up for sale each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferRule {
    AllStock,
    AboveGoal,
    SingleUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Behavior {
    pub produces: bool,
    pub consumes: bool,
    pub bid: BidBasis,
    pub offer: OfferRule,
}

impl AgentKind {
    pub const ALL: [AgentKind; 3] = [AgentKind::Consumer, AgentKind::Producer, AgentKind::Farmer];

    pub const fn behavior(self) -> Behavior {
        match self {
            AgentKind::Consumer => Behavior {
                produces: false,
                consumes: true,
                bid: BidBasis::Valuation,
                offer: OfferRule::AboveGoal,
            },
            AgentKind::Producer => Behavior {
                produces: true,
                consumes: false,
                bid: BidBasis::Price,
                offer: OfferRule::AllStock,
            },
            AgentKind::Farmer => Behavior {
                produces: true,
                consumes: true,
                bid: BidBasis::Price,
                offer: OfferRule::SingleUnit,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AgentKind::Consumer => "consumer",
            AgentKind::Producer => "producer",
            AgentKind::Farmer => "farmer",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
