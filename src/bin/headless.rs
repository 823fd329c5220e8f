// src/bin/headless.rs

//! Runs the economy without any UI and prints one JSON line of metrics per
//! round. Usage: `headless [CONFIG.json] [ROUNDS]`.
//! Set `RUST_LOG=debug` for per-round logs, `trace` for every trade.

use std::{env, fs, process::ExitCode};
use trade_network::{Economy, EconomyConfig, Simulation};

const DEFAULT_ROUNDS: u64 = 100;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(message) => {
                eprintln!("{message}");
                return ExitCode::FAILURE;
            }
        },
        None => EconomyConfig::default(),
    };
    let rounds = match args.next().map(|raw| raw.parse::<u64>()) {
        Some(Ok(rounds)) => rounds,
        Some(Err(e)) => {
            eprintln!("invalid round count: {e}");
            return ExitCode::FAILURE;
        }
        None => DEFAULT_ROUNDS,
    };

    let mut economy = match Economy::new(config) {
        Ok(economy) => economy,
        Err(e) => {
            eprintln!("cannot build economy: {e}");
            return ExitCode::FAILURE;
        }
    };

    for _ in 0..rounds {
        let metrics = economy.step();
        match serde_json::to_string(&metrics) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                eprintln!("cannot encode metrics: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

fn load_config(path: &str) -> Result<EconomyConfig, String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    EconomyConfig::from_json(&raw).map_err(|e| format!("{path}: {e}"))
}
