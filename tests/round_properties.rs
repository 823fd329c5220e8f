// tests/round_properties.rs

use trade_network::{
    DemandRule, Economy, EconomyConfig, Good, GoodMap, PartnerSelection, RoundPhase, Simulation,
};

fn config(seed: u64) -> EconomyConfig {
    EconomyConfig {
        num_consumers: 24,
        num_producers: 6,
        num_farmers: 4,
        seed,
        ..EconomyConfig::default()
    }
}

fn total_money(economy: &Economy) -> f64 {
    economy.agents().iter().map(|a| a.money).sum()
}

fn total_stock(economy: &Economy) -> GoodMap<u64> {
    GoodMap::from_fn(|good| {
        economy
            .agents()
            .iter()
            .map(|a| u64::from(a.inventory[good]))
            .sum()
    })
}

#[test]
fn trading_conserves_money_and_goods() {
    for selection in [PartnerSelection::FirstQualifying, PartnerSelection::ShopAround] {
        let mut economy = Economy::new(EconomyConfig {
            partner_selection: selection,
            ..config(5)
        })
        .unwrap();

        for _ in 0..25 {
            assert_eq!(economy.advance(), RoundPhase::Deciding);
            let money_before = total_money(&economy);
            let stock_before = total_stock(&economy);

            assert_eq!(economy.advance(), RoundPhase::Trading);
            let money_after = total_money(&economy);
            assert!(
                (money_after - money_before).abs() < 1e-6,
                "trading created or destroyed money: {money_before} -> {money_after}"
            );
            assert_eq!(total_stock(&economy), stock_before, "trading created or destroyed goods");

            economy.step();
        }
    }
}

#[test]
fn settled_trades_always_move_something() {
    let mut economy = Economy::new(config(8)).unwrap();
    let mut seen = 0;
    for _ in 0..30 {
        economy.step();
        for trade in economy.last_trades() {
            assert!(trade.quantity > 0);
            assert!(trade.unit_price > 0.0);
            assert_ne!(trade.buyer, trade.seller);
            assert!(
                economy.topology().neighbors(trade.buyer).contains(&trade.seller),
                "only neighbours may trade"
            );
        }
        seen += economy.last_trades().len();
    }
    assert!(seen > 0, "a default economy should trade at least once in 30 rounds");
}

#[test]
fn offers_never_exceed_inventory_when_published() {
    let mut economy = Economy::new(config(13)).unwrap();
    for _ in 0..20 {
        economy.advance();
        for agent in economy.agents() {
            for good in Good::ALL {
                assert!(agent.offer[good].quantity <= agent.inventory[good]);
            }
        }
        economy.step();
    }
}

#[test]
fn money_never_goes_negative() {
    let mut economy = Economy::new(EconomyConfig {
        demand_rule: DemandRule::SingleUnit,
        ..config(21)
    })
    .unwrap();
    for _ in 0..50 {
        economy.step();
        for agent in economy.agents() {
            assert!(agent.money >= 0.0, "agent {} has {}", agent.id, agent.money);
        }
    }
}

#[test]
fn identical_seeds_give_identical_metrics() {
    for seed in [1, 2, 3] {
        let mut a = Economy::new(config(seed)).unwrap();
        let mut b = Economy::new(config(seed)).unwrap();
        a.run(40);
        b.run(40);
        assert_eq!(a.metrics(), b.metrics(), "seed {seed} diverged");
    }
}

#[test]
fn snapshot_reflects_round_and_topology() {
    let mut economy = Economy::new(config(4)).unwrap();
    economy.run(3);
    let snapshot = economy.snapshot();

    assert_eq!(snapshot.round, 3);
    assert_eq!(snapshot.agents.len(), 34);
    assert_eq!(snapshot.edges, economy.topology().edges());
    for (i, agent) in snapshot.agents.iter().enumerate() {
        assert_eq!(agent.node, i);
    }
    let json = snapshot.to_json().unwrap();
    assert!(json.contains("\"edges\""));
}
