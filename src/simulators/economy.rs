// src/simulators/economy.rs

use super::simulation_trait::Simulation;
use crate::agents::{Agent, DecisionReport, decide, spawn_population};
use crate::config::{EconomyConfig, PartnerSelection};
use crate::error::{ConfigError, ConfigResult};
use crate::exchange::{Trade, TradeRules, cheapest_offer, propose, published_offers};
use crate::metrics::RoundMetrics;
use crate::network::Topology;
use crate::pricing::PriceAdaptation;
use crate::snapshot::Snapshot;
use crate::types::{Good, Offer};
use log::{debug, info, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// The last phase an economy completed. `Idle` sits between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Idle,
    Deciding,
    Trading,
    Adjusting,
    Collecting,
}

/// The simulation engine. It owns the network, the agents living on it and
/// the only random number generator of the run.
pub struct Economy {
    config: EconomyConfig,
    topology: Topology,
    agents: Vec<Agent>,
    rng: StdRng,
    round: u64,
    phase: RoundPhase,

    // This round's working data.
    trades: Vec<Trade>,
    decisions: DecisionReport,
    skipped: usize,

    metrics: Vec<RoundMetrics>,

    // Kept so `reset` can replay the run from the start.
    initial_agents: Vec<Agent>,
    initial_rng: StdRng,
}

impl Economy {
    /// Builds the network and draws the population, all from `config.seed`.
    pub fn new(config: EconomyConfig) -> ConfigResult<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let topology = Topology::build(
            config.total_agents(),
            config.connectivity_k,
            config.rewire_probability,
            config.topology_max_attempts,
            &mut rng,
        )?;
        let agents = spawn_population(&config, &mut rng);
        info!(
            "economy ready: {} consumers, {} producers, {} farmers on {} edges (seed {})",
            config.num_consumers,
            config.num_producers,
            config.num_farmers,
            topology.edge_count(),
            config.seed
        );
        Ok(Self::assemble(config, topology, agents, rng))
    }

    /// An economy over a caller-supplied network and population. Agent `i`
    /// must sit at index `i`; the population counts in `config` are ignored.
    pub fn from_parts(config: EconomyConfig, topology: Topology, agents: Vec<Agent>) -> ConfigResult<Self> {
        config.validate_rules()?;
        if agents.is_empty() {
            return Err(ConfigError::NoAgents);
        }
        if agents.len() != topology.node_count() {
            return Err(ConfigError::PopulationMismatch {
                agents: agents.len(),
                nodes: topology.node_count(),
            });
        }
        if let Some((position, agent)) = agents.iter().enumerate().find(|(i, a)| a.id != *i) {
            return Err(ConfigError::MisplacedAgent { position, id: agent.id });
        }
        let rng = StdRng::seed_from_u64(config.seed);
        info!("economy ready: {} hand-placed agents", agents.len());
        Ok(Self::assemble(config, topology, agents, rng))
    }

    fn assemble(config: EconomyConfig, topology: Topology, agents: Vec<Agent>, rng: StdRng) -> Self {
        Self {
            config,
            topology,
            initial_agents: agents.clone(),
            agents,
            initial_rng: rng.clone(),
            rng,
            round: 0,
            phase: RoundPhase::Idle,
            trades: Vec::new(),
            decisions: DecisionReport::default(),
            skipped: 0,
            metrics: Vec::new(),
        }
    }

    // === Read-only views for hosts ===

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: usize) -> Option<&Agent> {
        self.agents.get(id)
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Metrics of every completed round, oldest first.
    pub fn metrics(&self) -> &[RoundMetrics] {
        &self.metrics
    }

    /// Trades settled in the current (or just completed) round.
    pub fn last_trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.round, &self.agents, &self.topology)
    }

    // === Round state machine ===

    /// Runs the next phase of the round and returns it.
    /// Idle → Deciding → Trading → Adjusting → Collecting → Idle.
    pub fn advance(&mut self) -> RoundPhase {
        self.phase = match self.phase {
            RoundPhase::Idle => {
                self.begin_round();
                self.decide_all();
                RoundPhase::Deciding
            }
            RoundPhase::Deciding => {
                self.trade_all();
                RoundPhase::Trading
            }
            RoundPhase::Trading => {
                self.adjust_all();
                RoundPhase::Adjusting
            }
            RoundPhase::Adjusting => {
                self.collect();
                RoundPhase::Collecting
            }
            RoundPhase::Collecting => RoundPhase::Idle,
        };
        self.phase
    }

    fn begin_round(&mut self) {
        self.trades.clear();
        self.decisions = DecisionReport::default();
        self.skipped = 0;
    }

    /// Order-independent: each agent only touches itself.
    fn decide_all(&mut self) {
        for agent in self.agents.iter_mut() {
            let report = decide(agent, &self.config);
            self.decisions.absorb(&report);
        }
    }

    /// Strictly sequential. Buyers act in a fresh random order and visit
    /// their neighbours in a fresh random order, both from the seeded RNG.
    /// Every buyer shops against the offers published before trading began;
    /// one already sold out by an earlier buyer fails to settle and is skipped.
    fn trade_all(&mut self) {
        let rules = TradeRules::from_config(&self.config);
        let board = published_offers(&self.agents);
        let mut order: Vec<usize> = (0..self.agents.len()).collect();
        order.shuffle(&mut self.rng);

        for buyer in order {
            let mut neighbors: Vec<usize> = self.topology.neighbors(buyer).iter().copied().collect();
            neighbors.shuffle(&mut self.rng);

            match self.config.partner_selection {
                PartnerSelection::FirstQualifying => {
                    for &seller in &neighbors {
                        for good in Good::ALL {
                            self.try_trade(buyer, seller, board[seller][good], good, rules);
                        }
                    }
                }
                PartnerSelection::ShopAround => {
                    for good in Good::ALL {
                        if let Some(seller) = cheapest_offer(&self.agents[buyer], &board, &neighbors, good) {
                            self.try_trade(buyer, seller, board[seller][good], good, rules);
                        }
                    }
                }
            }
        }
    }

    fn try_trade(&mut self, buyer: usize, seller: usize, offer: Offer, good: Good, rules: TradeRules) {
        let Some(trade) = propose(&self.agents[buyer], seller, offer, good, rules) else {
            return;
        };
        match trade.settle(&mut self.agents) {
            Ok(()) => {
                trace!(
                    "round {}: agent {} bought {} {} from agent {} at {:.3}",
                    self.round + 1,
                    trade.buyer,
                    trade.quantity,
                    trade.good,
                    trade.seller,
                    trade.unit_price
                );
                self.trades.push(trade);
            }
            Err(reason) => {
                debug!("round {}: skipped settlement: {}", self.round + 1, reason);
                self.skipped += 1;
            }
        }
    }

    fn adjust_all(&mut self) {
        let adaptation = PriceAdaptation::from_config(&self.config);
        for agent in self.agents.iter_mut() {
            adaptation.apply(agent);
        }
    }

    /// Reads agent state only.
    fn collect(&mut self) {
        self.round += 1;
        let metrics = RoundMetrics::collect(
            self.round,
            &self.agents,
            &self.trades,
            &self.decisions,
            self.skipped,
        );
        debug!(
            "round {} done: {} trades, mean money {:.2}",
            self.round, metrics.trades, metrics.mean_money
        );
        self.metrics.push(metrics);
    }
}

impl Simulation for Economy {
    /// Finishes the current round, or runs a whole new one from `Idle`.
    fn step(&mut self) -> RoundMetrics {
        if self.phase == RoundPhase::Collecting {
            self.phase = RoundPhase::Idle;
        }
        while self.advance() != RoundPhase::Collecting {}
        self.phase = RoundPhase::Idle;
        self.metrics.last().cloned().unwrap_or_default()
    }

    fn round(&self) -> u64 {
        self.round
    }

    fn reset(&mut self) {
        self.agents = self.initial_agents.clone();
        self.rng = self.initial_rng.clone();
        self.round = 0;
        self.phase = RoundPhase::Idle;
        self.begin_round();
        self.metrics.clear();
        info!("economy reset to round 0");
    }
}
