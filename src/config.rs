// src/config.rs

//! Every tunable of a run. A config is validated once, when the economy is
//! built, and never changes afterwards.

use crate::agents::AgentKind;
use crate::agents::config::*;
use crate::error::{ConfigError, ConfigResult};
use crate::types::{Good, GoodMap};
use serde::{Deserialize, Serialize};

/// How many units a buyer still wants of a good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandRule {
    /// goal − inventory.
    #[default]
    GoalGap,
    /// floor(valuation) − inventory.
    ValuationGap,
    /// One unit per match.
    SingleUnit,
}

/// How a buyer picks which neighbours to trade with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerSelection {
    /// Walk the shuffled neighbours and take every qualifying offer.
    #[default]
    FirstQualifying,
    /// Per good, trade once with the neighbour asking the lowest price.
    ShopAround,
}

/// Ranges the starting population is drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endowment {
    pub money_min: f64,
    pub money_max: f64,
    pub inventory_max: u32,
    pub price_min: f64,
    pub price_max: f64,
    pub goal_max: GoodMap<u32>,
}

impl Default for Endowment {
    fn default() -> Self {
        Self {
            money_min: DEFAULT_MONEY_MIN,
            money_max: DEFAULT_MONEY_MAX,
            inventory_max: DEFAULT_INVENTORY_MAX,
            price_min: DEFAULT_PRICE_MIN,
            price_max: DEFAULT_PRICE_MAX,
            goal_max: DEFAULT_GOAL_MAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub num_consumers: usize,
    pub num_producers: usize,
    pub num_farmers: usize,

    pub connectivity_k: usize,
    pub rewire_probability: f64,
    pub topology_max_attempts: usize,

    pub cost_to_produce: GoodMap<f64>,
    /// Relative standard deviation of each producer's private cost.
    pub cost_jitter: f64,
    pub producer_batch: u32,
    pub farmer_batch: u32,
    pub reprice_step: f64,

    pub consumption_rate: u32,
    pub base_valuation: GoodMap<f64>,
    pub valuation_floor: f64,

    pub price_growth: f64,
    pub price_decay: f64,
    pub price_floor: f64,

    pub demand_rule: DemandRule,
    /// Upper bound on units per trade; `None` leaves trades uncapped.
    pub per_transaction_cap: Option<u32>,
    pub partner_selection: PartnerSelection,

    pub endowment: Endowment,
    pub seed: u64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            num_consumers: DEFAULT_NUM_CONSUMERS,
            num_producers: DEFAULT_NUM_PRODUCERS,
            num_farmers: DEFAULT_NUM_FARMERS,
            connectivity_k: DEFAULT_CONNECTIVITY_K,
            rewire_probability: DEFAULT_REWIRE_PROBABILITY,
            topology_max_attempts: DEFAULT_TOPOLOGY_MAX_ATTEMPTS,
            cost_to_produce: DEFAULT_COST_TO_PRODUCE,
            cost_jitter: 0.0,
            producer_batch: DEFAULT_PRODUCER_BATCH,
            farmer_batch: DEFAULT_FARMER_BATCH,
            reprice_step: DEFAULT_REPRICE_STEP,
            consumption_rate: DEFAULT_CONSUMPTION_RATE,
            base_valuation: DEFAULT_BASE_VALUATION,
            valuation_floor: DEFAULT_VALUATION_FLOOR,
            price_growth: DEFAULT_PRICE_GROWTH,
            price_decay: DEFAULT_PRICE_DECAY,
            price_floor: DEFAULT_PRICE_FLOOR,
            demand_rule: DemandRule::default(),
            per_transaction_cap: None,
            partner_selection: PartnerSelection::default(),
            endowment: Endowment::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl EconomyConfig {
    pub fn total_agents(&self) -> usize {
        self.num_consumers + self.num_producers + self.num_farmers
    }

    pub fn batch_size(&self, kind: AgentKind) -> u32 {
        match kind {
            AgentKind::Producer => self.producer_batch,
            AgentKind::Farmer => self.farmer_batch,
            AgentKind::Consumer => 0,
        }
    }

    pub fn from_json(json: &str) -> ConfigResult<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Full validation for a generated population.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.total_agents() == 0 {
            return Err(ConfigError::NoAgents);
        }
        if self.topology_max_attempts == 0 {
            return Err(ConfigError::ZeroQuantity { name: "topology_max_attempts" });
        }
        if !(0.0..=1.0).contains(&self.rewire_probability) {
            return Err(crate::error::TopologyError::InvalidProbability(self.rewire_probability).into());
        }
        self.validate_endowment()?;
        self.validate_rules()
    }

    /// The behavioural parameters only; used when the population is supplied
    /// by the caller.
    pub fn validate_rules(&self) -> ConfigResult<()> {
        for good in Good::ALL {
            let cost = self.cost_to_produce[good];
            if !cost.is_finite() || cost < 0.0 {
                return Err(ConfigError::InvalidCost { good, cost });
            }
            let value = self.base_valuation[good];
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValuation { good, value });
            }
        }

        check_factor("price_growth", self.price_growth, |v| v > 1.0)?;
        check_factor("price_decay", self.price_decay, |v| v > 0.0 && v < 1.0)?;
        check_factor("reprice_step", self.reprice_step, |v| v > 1.0)?;
        check_factor("price_floor", self.price_floor, |v| v > 0.0)?;
        check_factor("valuation_floor", self.valuation_floor, |v| v > 0.0)?;
        check_factor("cost_jitter", self.cost_jitter, |v| v >= 0.0)?;
        // An unsold below-cost price is repriced, then decayed, every round.
        if self.reprice_step * self.price_decay <= 1.0 {
            return Err(ConfigError::RepriceBelowDecay {
                reprice_step: self.reprice_step,
                price_decay: self.price_decay,
            });
        }

        if self.producer_batch == 0 {
            return Err(ConfigError::ZeroQuantity { name: "producer_batch" });
        }
        if self.farmer_batch == 0 {
            return Err(ConfigError::ZeroQuantity { name: "farmer_batch" });
        }
        if self.per_transaction_cap == Some(0) {
            return Err(ConfigError::ZeroQuantity { name: "per_transaction_cap" });
        }
        Ok(())
    }

    fn validate_endowment(&self) -> ConfigResult<()> {
        let e = &self.endowment;
        check_range("money", e.money_min, e.money_max, 0.0)?;
        // Prices must start strictly positive or no offer could ever clear.
        check_range("price", e.price_min, e.price_max, f64::MIN_POSITIVE)
    }
}

fn check_factor(name: &'static str, value: f64, ok: impl Fn(f64) -> bool) -> ConfigResult<()> {
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidFactor { name, value })
    }
}

fn check_range(name: &'static str, min: f64, max: f64, lowest: f64) -> ConfigResult<()> {
    if min.is_finite() && max.is_finite() && min >= lowest && min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { name, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(EconomyConfig::default().validate(), Ok(()));
        assert_eq!(EconomyConfig::default().total_agents(), 10);
    }

    #[test]
    fn test_rejects_empty_population() {
        let config = EconomyConfig {
            num_consumers: 0,
            num_producers: 0,
            num_farmers: 0,
            ..EconomyConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoAgents));
    }

    #[test]
    fn test_rejects_negative_cost() {
        let mut config = EconomyConfig::default();
        config.cost_to_produce[Good::Apples] = -1.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidCost { good: Good::Apples, cost: -1.0 })
        );
    }

    #[test]
    fn test_rejects_factors_on_the_wrong_side_of_one() {
        let growth = EconomyConfig { price_growth: 0.95, ..EconomyConfig::default() };
        assert!(matches!(
            growth.validate(),
            Err(ConfigError::InvalidFactor { name: "price_growth", .. })
        ));

        let decay = EconomyConfig { price_decay: 1.0, ..EconomyConfig::default() };
        assert!(matches!(
            decay.validate(),
            Err(ConfigError::InvalidFactor { name: "price_decay", .. })
        ));
    }

    #[test]
    fn test_rejects_reprice_step_that_decay_cancels_out() {
        // 1.1 * 0.9 = 0.99: a below-cost price would sink every round.
        let config = EconomyConfig { reprice_step: 1.1, price_decay: 0.9, ..EconomyConfig::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::RepriceBelowDecay { reprice_step: 1.1, price_decay: 0.9 })
        );

        let enough = EconomyConfig { reprice_step: 1.1, price_decay: 0.95, ..EconomyConfig::default() };
        assert_eq!(enough.validate(), Ok(()));
    }

    #[test]
    fn test_to_json_reports_the_reprice_step() {
        let json = EconomyConfig::default().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["reprice_step"], DEFAULT_REPRICE_STEP);
    }

    #[test]
    fn test_rejects_zero_transaction_cap() {
        let config = EconomyConfig { per_transaction_cap: Some(0), ..EconomyConfig::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroQuantity { name: "per_transaction_cap" })
        );
    }

    #[test]
    fn test_rejects_inverted_money_range() {
        let mut config = EconomyConfig::default();
        config.endowment.money_min = 50.0;
        config.endowment.money_max = 5.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { name: "money", .. })
        ));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = EconomyConfig::from_json(
            r#"{ "num_consumers": 20, "partner_selection": "shop_around", "per_transaction_cap": 1 }"#,
        )
        .unwrap();
        assert_eq!(config.num_consumers, 20);
        assert_eq!(config.partner_selection, PartnerSelection::ShopAround);
        assert_eq!(config.per_transaction_cap, Some(1));
        assert_eq!(config.num_producers, DEFAULT_NUM_PRODUCERS);
    }

    #[test]
    fn test_json_round_trip_keeps_every_field() {
        let config = EconomyConfig { cost_jitter: 0.2, seed: 9, ..EconomyConfig::default() };
        let parsed = EconomyConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(
            EconomyConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
