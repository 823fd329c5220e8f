// src/snapshot.rs

//! A read-only picture of the economy for renderers. Holds copies, never
//! references into live agent state.

use crate::agents::{Agent, AgentKind};
use crate::network::Topology;
use crate::types::{GoodMap, Offer};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSnapshot {
    pub id: usize,
    pub node: usize,
    pub kind: AgentKind,
    pub money: f64,
    pub inventory: GoodMap<u32>,
    pub price: GoodMap<f64>,
    pub valuation: GoodMap<f64>,
    pub offer: GoodMap<Offer>,
}

impl From<&Agent> for AgentSnapshot {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            node: agent.node(),
            kind: agent.kind,
            money: agent.money,
            inventory: agent.inventory,
            price: agent.price,
            valuation: agent.valuation,
            offer: agent.offer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Rounds completed when the snapshot was taken.
    pub round: u64,
    pub agents: Vec<AgentSnapshot>,
    /// Undirected edges as `(low, high)` node pairs.
    pub edges: Vec<(usize, usize)>,
}

impl Snapshot {
    pub fn capture(round: u64, agents: &[Agent], topology: &Topology) -> Self {
        Self {
            round,
            agents: agents.iter().map(AgentSnapshot::from).collect(),
            edges: topology.edges(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
