// src/metrics.rs

//! Aggregate read-only series handed to whatever collects or plots a run.

use crate::agents::{Agent, AgentKind, DecisionReport};
use crate::exchange::Trade;
use crate::types::{Good, GoodMap};
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// Cross-sectional summary of one good's price over all agents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PriceStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl PriceStats {
    /// All zeros for an empty sample.
    pub fn from_prices(prices: &[f64]) -> Self {
        if prices.is_empty() {
            return Self::default();
        }
        Self {
            mean: Statistics::mean(prices.iter()),
            min: Statistics::min(prices.iter()),
            max: Statistics::max(prices.iter()),
            std_dev: Statistics::population_std_dev(prices.iter()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RoundMetrics {
    pub round: u64,
    pub total_money: f64,
    pub mean_money: f64,
    /// Kinds with no agents are absent.
    pub mean_money_by_kind: BTreeMap<AgentKind, f64>,
    pub prices: GoodMap<PriceStats>,
    pub trades: usize,
    pub units_traded: GoodMap<u32>,
    pub units_produced: GoodMap<u32>,
    /// Money paid for production this round; it leaves the economy.
    pub production_spend: f64,
    /// Proposed trades dropped because a neighbour's offer had run dry.
    pub skipped_settlements: usize,
}

impl RoundMetrics {
    pub fn collect(
        round: u64,
        agents: &[Agent],
        trades: &[Trade],
        decisions: &DecisionReport,
        skipped_settlements: usize,
    ) -> Self {
        let total_money: f64 = agents.iter().map(|a| a.money).sum();
        let mean_money = if agents.is_empty() {
            0.0
        } else {
            total_money / agents.len() as f64
        };

        let mut mean_money_by_kind = BTreeMap::new();
        for kind in AgentKind::ALL {
            let money: Vec<f64> = agents
                .iter()
                .filter(|a| a.kind == kind)
                .map(|a| a.money)
                .collect();
            if !money.is_empty() {
                mean_money_by_kind.insert(kind, Statistics::mean(money.iter()));
            }
        }

        let prices = GoodMap::from_fn(|good| {
            let sample: Vec<f64> = agents.iter().map(|a| a.price[good]).collect();
            PriceStats::from_prices(&sample)
        });

        let mut units_traded = GoodMap::splat(0);
        for trade in trades {
            units_traded[trade.good] += trade.quantity;
        }

        Self {
            round,
            total_money,
            mean_money,
            mean_money_by_kind,
            prices,
            trades: trades.len(),
            units_traded,
            units_produced: decisions.produced,
            production_spend: decisions.spent,
            skipped_settlements,
        }
    }

    pub fn price_of(&self, good: Good) -> &PriceStats {
        &self.prices[good]
    }
}
