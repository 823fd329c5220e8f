// src/network/topology.rs

//! Who may trade with whom. Node `i` hosts agent `i` for the whole run.

use crate::error::TopologyError;
use log::debug;
use rand::Rng;
use std::collections::{BTreeSet, VecDeque};

/// A connected, undirected, simple graph. Neighbour sets are ordered so that
/// iteration never depends on hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    adjacency: Vec<BTreeSet<usize>>,
}

impl Topology {
    /// Builds a connected Watts-Strogatz small-world graph on `n` nodes.
    ///
    /// Every node starts linked to its `k / 2` nearest ring neighbours on each
    /// side, then each lattice edge is rewired with probability `p`. Samples
    /// are drawn until one is connected or `max_attempts` runs out.
    pub fn build<R: Rng + ?Sized>(
        n: usize,
        k: usize,
        p: f64,
        max_attempts: usize,
        rng: &mut R,
    ) -> Result<Self, TopologyError> {
        if n == 0 {
            return Err(TopologyError::EmptyGraph);
        }
        if !(0.0..=1.0).contains(&p) {
            return Err(TopologyError::InvalidProbability(p));
        }
        if k > n {
            return Err(TopologyError::DegreeExceedsNodes { n, k });
        }
        if k == n {
            return Ok(Self::complete(n));
        }
        if k < 2 {
            return Err(TopologyError::DegreeTooSmall { n, k });
        }

        let attempts = max_attempts.max(1);
        for attempt in 1..=attempts {
            let mut adjacency = ring_lattice(n, k / 2);
            rewire(&mut adjacency, k / 2, p, rng);
            let topology = Self { adjacency };
            if topology.is_connected() {
                debug!(
                    "built small-world graph: n={} k={} p={} edges={} after {} attempt(s)",
                    n,
                    k,
                    p,
                    topology.edge_count(),
                    attempt
                );
                return Ok(topology);
            }
        }
        Err(TopologyError::Disconnected { attempts })
    }

    /// An explicit graph, for hand-built scenarios. Duplicate edges collapse.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self, TopologyError> {
        if n == 0 {
            return Err(TopologyError::EmptyGraph);
        }
        let mut adjacency = vec![BTreeSet::new(); n];
        for &(from, to) in edges {
            if from == to || from >= n || to >= n {
                return Err(TopologyError::InvalidEdge { from, to, n });
            }
            adjacency[from].insert(to);
            adjacency[to].insert(from);
        }
        let topology = Self { adjacency };
        if !topology.is_connected() {
            return Err(TopologyError::Disconnected { attempts: 1 });
        }
        Ok(topology)
    }

    fn complete(n: usize) -> Self {
        let adjacency = (0..n)
            .map(|u| (0..n).filter(|&v| v != u).collect())
            .collect();
        Self { adjacency }
    }

    /// Panics if `node` is not part of the graph; agents only ever ask about
    /// their own node.
    pub fn neighbors(&self, node: usize) -> &BTreeSet<usize> {
        &self.adjacency[node]
    }

    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Every edge once, as `(low, high)`, in ascending order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, ns)| ns.range(u + 1..).map(move |&v| (u, v)))
            .collect()
    }

    pub fn is_connected(&self) -> bool {
        let n = self.adjacency.len();
        if n == 0 {
            return false;
        }
        let mut seen = vec![false; n];
        let mut queue = VecDeque::from([0]);
        seen[0] = true;
        let mut reached = 1;
        while let Some(u) = queue.pop_front() {
            for &v in &self.adjacency[u] {
                if !seen[v] {
                    seen[v] = true;
                    reached += 1;
                    queue.push_back(v);
                }
            }
        }
        reached == n
    }
}

fn ring_lattice(n: usize, half_k: usize) -> Vec<BTreeSet<usize>> {
    let mut adjacency = vec![BTreeSet::new(); n];
    for j in 1..=half_k {
        for u in 0..n {
            let v = (u + j) % n;
            adjacency[u].insert(v);
            adjacency[v].insert(u);
        }
    }
    adjacency
}

// Visits lattice edges by ring distance, then by node, so a fixed RNG stream
// always produces the same graph.
fn rewire<R: Rng + ?Sized>(adjacency: &mut [BTreeSet<usize>], half_k: usize, p: f64, rng: &mut R) {
    let n = adjacency.len();
    for j in 1..=half_k {
        for u in 0..n {
            if !rng.gen_bool(p) {
                continue;
            }
            // `u` already touches everyone: nothing to rewire to.
            if adjacency[u].len() >= n - 1 {
                continue;
            }
            let v = (u + j) % n;
            let w = loop {
                let candidate = rng.gen_range(0..n);
                if candidate != u && !adjacency[u].contains(&candidate) {
                    break candidate;
                }
            };
            adjacency[u].remove(&v);
            adjacency[v].remove(&u);
            adjacency[u].insert(w);
            adjacency[w].insert(u);
        }
    }
}
