// src/agents/endowment.rs

//! Draws the starting population from the configured ranges.

use super::agent::Agent;
use super::agent_kind::AgentKind;
use super::config::COST_JITTER_FLOOR;
use crate::config::EconomyConfig;
use crate::types::{Good, Offer};
use rand::Rng;
use rand::distributions::Distribution;
use rand::seq::SliceRandom;
use rand_distr::Normal;

/// One agent per node, kinds scattered over the nodes at random.
/// Expects a validated config.
pub fn spawn_population<R: Rng + ?Sized>(config: &EconomyConfig, rng: &mut R) -> Vec<Agent> {
    let mut kinds = Vec::with_capacity(config.total_agents());
    kinds.extend(std::iter::repeat(AgentKind::Consumer).take(config.num_consumers));
    kinds.extend(std::iter::repeat(AgentKind::Producer).take(config.num_producers));
    kinds.extend(std::iter::repeat(AgentKind::Farmer).take(config.num_farmers));
    kinds.shuffle(rng);

    // A zero jitter means every producer faces the configured cost exactly.
    let cost_noise = if config.cost_jitter > 0.0 {
        Normal::new(0.0, config.cost_jitter).ok()
    } else {
        None
    };

    let mut agents = Vec::with_capacity(kinds.len());
    for (id, kind) in kinds.into_iter().enumerate() {
        agents.push(draw_agent(id, kind, config, cost_noise.as_ref(), rng));
    }
    agents
}

fn draw_agent<R: Rng + ?Sized>(
    id: usize,
    kind: AgentKind,
    config: &EconomyConfig,
    cost_noise: Option<&Normal<f64>>,
    rng: &mut R,
) -> Agent {
    let e = &config.endowment;
    let mut agent = Agent::new(id, kind, rng.gen_range(e.money_min..=e.money_max));

    for good in Good::ALL {
        agent.inventory[good] = rng.gen_range(0..=e.inventory_max);
        agent.goal[good] = rng.gen_range(0..=e.goal_max[good]);
        agent.price[good] = rng.gen_range(e.price_min..=e.price_max);
        agent.base_valuation[good] = config.base_valuation[good];
        agent.refresh_valuation(good, config.valuation_floor);
        agent.offer[good] = Offer::closed(agent.price[good]);

        let cost = config.cost_to_produce[good];
        agent.cost_to_produce[good] = match cost_noise {
            Some(noise) if kind.behavior().produces => {
                let shock = noise.sample(rng);
                (cost * (1.0 + shock)).max(cost * COST_JITTER_FLOOR)
            }
            _ => cost,
        };
    }
    agent
}
